use crate::error::Result;

use super::{Formatter, FormatterKind};

/// Runs several formatters in sequence.
/// Forward applies the steps in order, reverse undoes them back to front.
pub struct ChainFormatter {
    name: String,
    steps: Vec<Box<dyn Formatter>>,
}

impl ChainFormatter {
    pub fn new(name: impl Into<String>, steps: Vec<Box<dyn Formatter>>) -> Self {
        Self {
            name: name.into(),
            steps,
        }
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }
}

impl Formatter for ChainFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FormatterKind {
        FormatterKind::Chain
    }

    fn forward(&self, text: &str) -> Result<String> {
        let mut value = text.to_string();
        for step in &self.steps {
            value = step.forward(&value)?;
        }
        Ok(value)
    }

    fn reverse(&self, text: &str) -> Result<String> {
        let mut value = text.to_string();
        for step in self.steps.iter().rev() {
            value = step.reverse(&value)?;
        }
        Ok(value)
    }

    fn round_trips(&self) -> bool {
        self.steps.iter().all(|s| s.round_trips())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{AffixFormatter, GroupAlign, GroupingFormatter};

    fn amount() -> ChainFormatter {
        ChainFormatter::new(
            "amount",
            vec![
                Box::new(GroupingFormatter::new("thousands", 3, " ", GroupAlign::Right).unwrap()),
                Box::new(AffixFormatter::new("kr", "kr ", ",-")),
            ],
        )
    }

    #[test]
    fn test_forward_in_order() {
        assert_eq!(amount().forward("1250000").unwrap(), "kr 1 250 000,-");
    }

    #[test]
    fn test_reverse_back_to_front() {
        assert_eq!(amount().reverse("kr 1 250 000,-").unwrap(), "1250000");
    }

    #[test]
    fn test_step_names_and_round_trip_flag() {
        let chain = amount();
        assert_eq!(chain.step_names(), vec!["thousands", "kr"]);
        assert!(chain.round_trips());
    }
}
