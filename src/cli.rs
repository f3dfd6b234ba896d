use anyhow::{ensure, Result};
use clap::Parser;

/// Season loaded when no range is given.
pub const DEFAULT_SEASON: u16 = 2023;

/// Load the default season, or every season from YEAR_START to YEAR_END.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version)]
pub struct SeasonArgs {
    /// First season to load (inclusive)
    #[arg(requires = "year_end")]
    pub year_start: Option<u16>,

    /// Last season to load (inclusive)
    pub year_end: Option<u16>,
}

impl SeasonArgs {
    /// The seasons to load, in ascending order.
    pub fn seasons(&self) -> Result<Vec<u16>> {
        match (self.year_start, self.year_end) {
            (Some(start), Some(end)) => {
                ensure!(
                    start <= end,
                    "year_start ({}) must not be after year_end ({})",
                    start,
                    end
                );
                Ok((start..=end).collect())
            }
            _ => Ok(vec![DEFAULT_SEASON]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<SeasonArgs, clap::Error> {
        SeasonArgs::try_parse_from(std::iter::once("load_dst").chain(args.iter().copied()))
    }

    #[test]
    fn no_args_is_default_season() -> Result<()> {
        assert_eq!(parse(&[])?.seasons()?, vec![DEFAULT_SEASON]);
        Ok(())
    }

    #[test]
    fn range_is_inclusive() -> Result<()> {
        assert_eq!(parse(&["2010", "2014"])?.seasons()?, vec![2010, 2011, 2012, 2013, 2014]);
        assert_eq!(parse(&["2020", "2020"])?.seasons()?, vec![2020]);
        Ok(())
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(parse(&["2010"]).is_err());
        assert!(parse(&["2010", "2011", "2012"]).is_err());
        assert!(parse(&["twenty", "2011"]).is_err());
    }

    #[test]
    fn reversed_range_is_rejected() -> Result<()> {
        assert!(parse(&["2014", "2010"])?.seasons().is_err());
        Ok(())
    }
}
