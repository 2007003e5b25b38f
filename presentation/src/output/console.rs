//! Console output formatter for survey questions, recommendations and
//! savings estimates

use crate::output::report::{RecommendationReport, SolutionView};
use aftersale_domain::{
    HintKind, Insurer, ParkingIncomeEstimate, Question, SavingsEstimate, ScenarioId, Solution,
    SurveyCatalog,
};
use colored::Colorize;
use serde::Serialize;

/// Formats survey state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// A question with its hint and numbered options.
    ///
    /// `selected` marks the options already chosen for multi-select
    /// questions; `progress` is `(answered, total)`.
    pub fn question(question: &Question, progress: (usize, usize), selected: &[String]) -> String {
        let mut output = String::new();

        if let Some(hint) = &question.hint {
            let label = match hint.kind {
                HintKind::Info => "i".blue().bold(),
                HintKind::Nudge => "!".yellow().bold(),
                HintKind::Tip => "*".green().bold(),
            };
            output.push_str(&format!("{} {}\n\n", label, hint.text.dimmed()));
        }

        output.push_str(&format!(
            "{} {}\n",
            format!("[{}/{}]", progress.0 + 1, progress.1.max(progress.0 + 1)).dimmed(),
            question.text.bold()
        ));

        for (i, option) in question.options.iter().enumerate() {
            let marker = if question.is_multiple() {
                if selected.contains(&option.value) {
                    "[x] ".green().to_string()
                } else {
                    "[ ] ".to_string()
                }
            } else {
                String::new()
            };
            let icon = option
                .icon
                .as_deref()
                .map(|icon| format!("{} ", icon))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {} {}{}{}\n",
                format!("{:>2}.", i + 1).cyan(),
                marker,
                icon,
                option.label
            ));
        }

        if question.is_multiple() {
            output.push_str(&format!(
                "{}\n",
                "Toggle options by number, press Enter on an empty line when done.".dimmed()
            ));
        }

        output
    }

    /// Ranked solutions
    pub fn recommendations(solutions: &[&Solution]) -> String {
        let views: Vec<SolutionView> = solutions.iter().map(|s| SolutionView::from(*s)).collect();
        Self::solution_list(&views)
    }

    fn solution_list(solutions: &[SolutionView]) -> String {
        let mut output = Self::section_header("Recommended for you");
        if solutions.is_empty() {
            output.push_str("  Nothing to recommend right now.\n");
            return output;
        }
        for (i, solution) in solutions.iter().enumerate() {
            output.push_str(&format!(
                "\n  {} {}\n",
                format!("{}.", i + 1).yellow().bold(),
                solution.title.bold()
            ));
            if !solution.description.is_empty() {
                output.push_str(&format!("     {}\n", solution.description));
            }
            match &solution.destination {
                Some(destination) => output.push_str(&format!(
                    "     {} {}\n",
                    format!("-> {}", solution.cta).green(),
                    destination.dimmed()
                )),
                None => {
                    output.push_str(&format!("     {}\n", format!("-> {}", solution.cta).green()))
                }
            }
        }
        output
    }

    /// Text rendering of a [`RecommendationReport`]
    pub fn report(report: &RecommendationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Survey Result"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Scenario:".cyan().bold(),
            Self::scenario_label(report.scenario)
        ));
        output.push_str(&format!(
            "{} {}/{} answered{}\n",
            "Progress:".cyan().bold(),
            report.answered,
            report.total,
            if report.complete {
                format!(" ({})", "complete".green())
            } else {
                String::new()
            }
        ));
        if let Some(next) = &report.next_question {
            output.push_str(&format!("{} {}\n", "Next question:".cyan().bold(), next));
        }
        if !report.ignored_answers.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Not asked in this scenario:".yellow(),
                report.ignored_answers.join(", ")
            ));
        }

        output.push_str(&Self::solution_list(&report.solutions));
        output.push_str(&Self::footer());
        output
    }

    /// Pretty JSON for any serializable result
    pub fn json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Short summary of a loaded catalog
    pub fn catalog_summary(catalog: &SurveyCatalog) -> String {
        let mut output = Self::header("Survey Catalog");
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Trigger question:".cyan().bold(),
            catalog.trigger_question_id()
        ));

        output.push_str(&Self::section_header("Questions"));
        for question in catalog.questions() {
            let mut notes = Vec::new();
            if question.is_multiple() {
                notes.push("multiple".to_string());
            }
            if let Some(branch) = question.branch {
                notes.push(format!("scenario {}", branch));
            }
            if let Some(rule) = &question.show_if {
                notes.push(format!("if {} in [{}]", rule.question_id, rule.values.join(", ")));
            }
            let notes = if notes.is_empty() {
                String::new()
            } else {
                format!(" ({})", notes.join("; ")).dimmed().to_string()
            };
            output.push_str(&format!(
                "  {:<10} {}{}\n",
                question.phase.as_str().dimmed(),
                question.id,
                notes
            ));
        }

        output.push_str(&Self::section_header("Solutions"));
        for solution in catalog.solutions() {
            output.push_str(&format!(
                "  {:>2}  {} {}\n",
                solution.priority,
                solution.id,
                format!("- {}", solution.title).dimmed()
            ));
        }

        let dangling = catalog.dangling_solution_ids();
        if !dangling.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Unknown solution ids (ignored):".yellow().bold(),
                dangling.join(", ")
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Savings estimate with partner insurers
    pub fn savings(estimate: &SavingsEstimate, insurers: &[Insurer]) -> String {
        let mut output = Self::header("Insurance Savings Estimate");
        output.push('\n');
        output.push_str(&format!(
            "{} {} yen/month\n",
            "Current premium:".cyan().bold(),
            Self::yen(estimate.current_monthly_price.into())
        ));
        output.push_str(&format!(
            "{} {} yen/month\n",
            "Market rate:".cyan().bold(),
            Self::yen(estimate.recommended_price.into())
        ));

        if estimate.has_savings() {
            output.push_str(&format!(
                "\n{} {} yen/month, {} yen/year ({}%)\n",
                "You could save".green().bold(),
                Self::yen(estimate.monthly_savings.into()),
                Self::yen(estimate.yearly_savings),
                estimate.savings_percentage
            ));
        } else {
            output.push_str(&format!(
                "\n{}\n",
                "Your premium is already at or below the market rate.".green()
            ));
        }

        output.push_str(&Self::section_header("Partner insurers"));
        for insurer in insurers {
            let discount = insurer
                .discount
                .map(|d| format!(" (up to {} yen off)", Self::yen(d.into())))
                .unwrap_or_default();
            output.push_str(&format!("  {}{}\n", insurer.name.bold(), discount.green()));
            for feature in insurer.features {
                output.push_str(&format!("    * {}\n", feature));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Parking share income estimate
    pub fn parking(estimate: &ParkingIncomeEstimate) -> String {
        let mut output = Self::header("Parking Share Income Estimate");
        output.push('\n');
        output.push_str(&format!(
            "{} {} yen/day at {}% occupancy\n",
            "Assumed rate:".cyan().bold(),
            Self::yen(estimate.price_per_day.into()),
            estimate.occupancy_percent
        ));
        output.push_str(&format!(
            "\n{} {} yen/month, {} yen/year\n",
            "Expected income".green().bold(),
            Self::yen(estimate.monthly_revenue),
            Self::yen(estimate.yearly_revenue)
        ));
        output.push_str(&Self::footer());
        output
    }

    /// An assistant reply, indented under a label
    pub fn assistant_reply(reply: &str) -> String {
        format!("{}\n{}\n", "Assistant:".magenta().bold(), Self::indent(reply, "  "))
    }

    fn scenario_label(scenario: Option<ScenarioId>) -> String {
        match scenario {
            Some(s) => format!("{} ({})", s, s.description()),
            None => "undetermined".to_string(),
        }
    }

    fn yen(amount: u64) -> String {
        let digits = amount.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        grouped
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftersale_domain::{Phase, SurveyOption, TOP_INSURERS};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_question_lists_numbered_options_and_hint() {
        plain();
        let question = Question::new("insurance", Phase::Situation, "Insurance?")
            .with_hint("Check this first.", HintKind::Info)
            .with_option(SurveyOption::new("active", "Still active"))
            .with_option(SurveyOption::new("cancelled", "Cancelled").with_icon("x"));

        let text = ConsoleFormatter::question(&question, (1, 4), &[]);
        assert!(text.contains("Check this first."));
        assert!(text.contains("[2/4] Insurance?"));
        assert!(text.contains(" 1. Still active"));
        assert!(text.contains(" 2. x Cancelled"));
    }

    #[test]
    fn test_multiple_question_marks_selection() {
        plain();
        let question = Question::new("interests", Phase::Needs, "Interests?")
            .multiple()
            .with_option(SurveyOption::new("cost", "Costs"))
            .with_option(SurveyOption::new("car", "Car"));

        let text = ConsoleFormatter::question(&question, (3, 4), &["car".to_string()]);
        assert!(text.contains("[ ] Costs"));
        assert!(text.contains("[x] Car"));
    }

    #[test]
    fn test_recommendations_show_cta_destination() {
        plain();
        let solution = Solution::new("insurance-review", "Review your insurance", 3);
        let text = ConsoleFormatter::recommendations(&[&solution]);
        assert!(text.contains("1. Review your insurance"));
        assert!(text.contains("-> Review your insurance /inquiry"));

        let empty = ConsoleFormatter::recommendations(&[]);
        assert!(empty.contains("Nothing to recommend"));
    }

    #[test]
    fn test_savings_output() {
        plain();
        let estimate = SavingsEstimate::calculate(8000, 35, 16, true);
        let text = ConsoleFormatter::savings(&estimate, TOP_INSURERS);
        assert!(text.contains("8,000 yen/month"));
        assert!(text.contains("3,550 yen/month, 42,600 yen/year (44%)"));
        assert!(text.contains("SBI Sonpo"));
    }

    #[test]
    fn test_parking_output() {
        plain();
        let text = ConsoleFormatter::parking(&ParkingIncomeEstimate::default());
        assert!(text.contains("600 yen/day at 30% occupancy"));
        assert!(text.contains("5,400 yen/month, 64,800 yen/year"));
    }

    #[test]
    fn test_yen_grouping() {
        assert_eq!(ConsoleFormatter::yen(0), "0");
        assert_eq!(ConsoleFormatter::yen(999), "999");
        assert_eq!(ConsoleFormatter::yen(24230), "24,230");
        assert_eq!(ConsoleFormatter::yen(1234567), "1,234,567");
        assert_eq!(ConsoleFormatter::yen(4_799_946_600), "4,799,946,600");
    }
}
