//! Error types for table loading and statistic computation.

use thiserror::Error;

/// Errors raised while validating a table or computing a statistic.
///
/// Every variant is fatal: the run aborts and no report is produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// A required column is absent from the input header.
    #[error("missing required column '{column}'")]
    Schema { column: String },

    /// The input contains a header but no data rows.
    #[error("input table has no rows")]
    EmptyTable,

    /// A ratio or mean was requested over a group with no members.
    #[error("cannot compute {statistic}: the reference group is empty")]
    EmptyPartition { statistic: &'static str },

    /// A top-1 selection had no candidates to choose from.
    #[error("cannot compute {statistic}: no matching rows")]
    EmptyResult { statistic: &'static str },

    /// Writing the printed report failed.
    #[error("failed to print report: {0}")]
    Print(String),
}

impl AnalysisError {
    pub(crate) fn empty_partition(statistic: &'static str) -> Self {
        Self::EmptyPartition { statistic }
    }

    pub(crate) fn empty_result(statistic: &'static str) -> Self {
        Self::EmptyResult { statistic }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_statistic() {
        let err = AnalysisError::empty_partition("rich_percentage");
        assert!(err.to_string().contains("rich_percentage"));

        let err = AnalysisError::empty_result("top_IN_occupation");
        assert!(err.to_string().contains("top_IN_occupation"));

        let err = AnalysisError::Schema {
            column: "race".to_string(),
        };
        assert_eq!(err.to_string(), "missing required column 'race'");
    }
}
