//! Filter token parsing: maps CLI-style tokens to constructed filters.
//!
//! Grammar: `-crop W H | -gs | -neg | -sharp | -edge T | -blur S | -acos`,
//! repeated in any order; filters are applied in the order given.

use std::num::NonZeroU32;
use std::str::FromStr;

use super::Filter;
use crate::error::BmpError;

/// Parse an ordered filter list from raw tokens.
pub fn parse_filters<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Filter>, BmpError> {
    let mut filters = Vec::new();
    let mut pos = 0;
    while pos < tokens.len() {
        let name = tokens[pos].as_ref();
        pos += 1;
        let filter = match name {
            "-crop" => {
                let width: i32 = numeric_param(tokens, &mut pos, "crop")?;
                let height: i32 = numeric_param(tokens, &mut pos, "crop")?;
                if width <= 0 || height <= 0 {
                    return Err(BmpError::invalid_arg(
                        "crop width and height must be positive",
                    ));
                }
                Filter::Crop { width, height }
            }
            "-gs" => Filter::Grayscale,
            "-neg" => Filter::Negative,
            "-sharp" => Filter::Sharpen,
            "-edge" => {
                // u8 parsing enforces the 0..=255 domain
                let threshold: u8 = numeric_param(tokens, &mut pos, "edge")?;
                Filter::EdgeDetect { threshold }
            }
            "-blur" => {
                let sigma: u32 = numeric_param(tokens, &mut pos, "blur")?;
                let sigma = NonZeroU32::new(sigma)
                    .ok_or_else(|| BmpError::invalid_arg("blur sigma must be positive"))?;
                Filter::Blur { sigma }
            }
            "-acos" => Filter::AcosRemap,
            other => {
                return Err(BmpError::InvalidArgument(format!("no such filter {other}")));
            }
        };
        filters.push(filter);
    }
    Ok(filters)
}

fn numeric_param<T, S>(tokens: &[S], pos: &mut usize, filter: &str) -> Result<T, BmpError>
where
    T: FromStr,
    S: AsRef<str>,
{
    let token = tokens
        .get(*pos)
        .ok_or_else(|| BmpError::InvalidArgument(format!("not enough arguments for {filter}")))?
        .as_ref();
    *pos += 1;
    token.parse().map_err(|_| {
        BmpError::InvalidArgument(format!("bad parameter {token:?} for {filter}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(tokens: &[&str]) -> Result<Vec<Filter>, BmpError> {
        parse_filters(tokens)
    }

    #[test]
    fn parses_a_full_chain_in_order() {
        let filters = parse(&[
            "-crop", "100", "80", "-gs", "-neg", "-sharp", "-edge", "10", "-blur", "3", "-acos",
        ])
        .unwrap();
        assert_eq!(
            filters,
            vec![
                Filter::Crop {
                    width: 100,
                    height: 80,
                },
                Filter::Grayscale,
                Filter::Negative,
                Filter::Sharpen,
                Filter::EdgeDetect { threshold: 10 },
                Filter::Blur {
                    sigma: NonZeroU32::new(3).unwrap(),
                },
                Filter::AcosRemap,
            ]
        );
    }

    #[test]
    fn empty_token_list_is_an_empty_pipeline() {
        assert_eq!(parse(&[]).unwrap(), vec![]);
    }

    #[test]
    fn rejects_unknown_filter() {
        let err = parse(&["-nope"]).unwrap_err();
        assert!(matches!(err, BmpError::InvalidArgument(_)));
        assert!(err.to_string().contains("-nope"));
    }

    #[test]
    fn rejects_missing_parameters() {
        assert!(parse(&["-crop", "10"]).is_err());
        assert!(parse(&["-edge"]).is_err());
        assert!(parse(&["-blur"]).is_err());
    }

    #[test]
    fn rejects_out_of_domain_parameters() {
        assert!(parse(&["-crop", "0", "10"]).is_err());
        assert!(parse(&["-crop", "-3", "10"]).is_err());
        assert!(parse(&["-edge", "256"]).is_err());
        assert!(parse(&["-edge", "ten"]).is_err());
        assert!(parse(&["-blur", "0"]).is_err());
    }

    #[test]
    fn a_parameter_is_not_a_filter_name() {
        // the crop parameters are consumed, so "100" is never looked up
        let filters = parse(&["-crop", "100", "100"]).unwrap();
        assert_eq!(filters.len(), 1);
    }
}
