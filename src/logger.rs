//! A logger that prints the settings and the outcome
//! of a combination to the terminal.
use colored::Colorize;

use std::time::Instant;

use crate::{
    Combination,
    CombinationMethod,
    CombineOptions,
    Vote,
    error::Result,
};

const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// Struct `CombineLogger` runs [`Vote::combine`]
/// and prints its settings and outcome.
/// ```no_run
/// use multivote::prelude::*;
/// let vote = Vote::new(vec![PredictionRecord::new("a")]);
/// let combined = CombineLogger::new(&vote)
///     .method(CombinationMethod::Plurality)
///     .full(true)
///     .run()
///     .unwrap();
/// ```
pub struct CombineLogger<'a> {
    vote: &'a Vote,
    method: CombinationMethod,
    options: CombineOptions,
    full: bool,
    verbose: bool,
}


impl<'a> CombineLogger<'a> {
    /// Create a new instance of `CombineLogger`.
    pub fn new(vote: &'a Vote) -> Self {
        Self {
            vote,
            method: CombinationMethod::default(),
            options: CombineOptions::default(),
            full: false,
            verbose: true,
        }
    }


    /// Set the combination method. Default is plurality.
    pub fn method(mut self, method: CombinationMethod) -> Self {
        self.method = method;
        self
    }


    /// Set the combination options.
    pub fn options(mut self, options: CombineOptions) -> Self {
        self.options = options;
        self
    }


    /// Ask for the full output.
    pub fn full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }


    /// If `false`, `run` prints nothing. Default is `true`.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Returns the settings printed in the STATS block.
    pub fn stats(&self) -> Vec<(&'static str, String)> {
        let mut stats = vec![
            ("Method", self.method.to_string()),
            ("Task", format!("{:?}", self.vote.task())),
            ("Records", self.vote.len().to_string()),
            ("Boosting", self.vote.is_boosting().to_string()),
        ];
        if self.method == CombinationMethod::Threshold {
            let threshold = self.options.threshold
                .map(|t| t.to_string())
                .unwrap_or_else(|| "Nothing".into());
            let category = self.options.category.as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "Nothing".into());
            stats.push(("Threshold", threshold));
            stats.push(("Category", category));
        }
        stats
    }


    #[inline(always)]
    fn print_stats(&self) {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        let lines = self.stats()
            .into_iter()
            .map(|(key, val)| {
                format!(
                    "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
                    key.bold(),
                    val.bold().green(),
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        println!("\n{header}\n{lines}\n{:=^FULL_WIDTH$}\n", "".bold());
    }


    #[inline(always)]
    fn print_outcome(&self, result: &Result<Combination>, micros: u128) {
        match result {
            Ok(combined) => {
                let confidence = combined.confidence()
                    .or(combined.probability())
                    .map(|c| format!("{c:>WIDTH$.PREC_WIDTH$}"))
                    .unwrap_or_else(|| format!("{:>WIDTH$}", "-"));
                println!(
                    "{} {}\t{}\t{}",
                    "[FIN]".bold().bright_green(),
                    format!("{:>WIDTH$}", combined.prediction()).bold().blue(),
                    confidence.bold().yellow(),
                    format!("{micros:>WIDTH$}us").bold().cyan(),
                );
            },
            Err(err) => {
                println!(
                    "{} {}",
                    "[ERR]".bold().bright_red(),
                    err.to_string().red(),
                );
            },
        }
    }


    /// Combine the vote, printing the settings and the outcome
    /// when verbose.
    pub fn run(&self) -> Result<Combination> {
        if self.verbose { self.print_stats(); }

        let now = Instant::now();
        let result = self.vote.combine(self.method, &self.options, self.full);
        let micros = now.elapsed().as_micros();

        if self.verbose { self.print_outcome(&result, micros); }
        result
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::PredictionRecord;

    #[test]
    fn run_returns_the_combination() {
        let vote = Vote::new(vec![
            PredictionRecord::new("a"),
            PredictionRecord::new("b"),
            PredictionRecord::new("a"),
        ]);
        let combined = CombineLogger::new(&vote)
            .verbose(false)
            .run()
            .unwrap();
        assert_eq!(combined.prediction(), &crate::Prediction::from("a"));
    }

    #[test]
    fn stats_list_threshold_settings() {
        let vote = Vote::new(vec![PredictionRecord::new("a")]);
        let options = CombineOptions::default().threshold(1);
        let logger = CombineLogger::new(&vote)
            .method(CombinationMethod::Threshold)
            .options(options);
        let stats = logger.stats();
        assert!(stats.contains(&("Threshold", "1".to_string())));
        assert!(stats.contains(&("Category", "Nothing".to_string())));
    }

    #[test]
    fn run_reports_errors() {
        let vote = Vote::default();
        let result = CombineLogger::new(&vote).run();
        assert!(result.is_err());
    }
}
