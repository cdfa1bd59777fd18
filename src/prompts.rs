/// Fixed instruction sent ahead of every uploaded label.
pub const INGREDIENT_ANALYSIS: &str = include_str!("../data/prompts/ingredient_analysis.txt");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_non_empty() {
        assert!(!INGREDIENT_ANALYSIS.trim().is_empty());
    }

    #[test]
    fn test_instruction_asks_for_table() {
        assert!(INGREDIENT_ANALYSIS.contains("generate a table"));
        assert!(INGREDIENT_ANALYSIS.contains("pros and cons"));
    }
}
