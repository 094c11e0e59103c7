//! Console reporter with colored output

use crate::analyzer::{AggregateStats, ScoreCalculator};
use crate::{FeedbackReport, Grade};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show matched/missing evidence
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single evaluation. `source` names where the prompt came
    /// from (a file path, or "prompt" for inline text).
    pub fn report(&self, source: &str, report: &FeedbackReport) {
        self.print_header(source, report);
        self.print_score(report);
        self.print_breakdown(report);

        if !report.strengths.is_empty() {
            println!("   {}", "Strengths:".bold());
            for strength in &report.strengths {
                println!("   {} {}", "✓".green(), strength);
            }
            println!();
        }

        if !report.improvements.is_empty() {
            println!("   {}", "Areas for Improvement:".bold());
            for improvement in &report.improvements {
                println!("   {} {}", "✗".yellow(), improvement);
            }
            println!();
        }

        if !report.suggestions.is_empty() {
            println!("   {}", "Suggestions:".bold());
            for suggestion in &report.suggestions {
                println!("   {} {}", "→".cyan(), suggestion);
            }
            println!();
        }

        if let Some(ref improved) = report.improved_prompt {
            println!("   {}", "Improved Prompt:".bold());
            println!("   {}", improved.italic());
            println!();
        }
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[(String, FeedbackReport)], stats: &AggregateStats) {
        for (source, report) in results {
            self.report(source, report);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, source: &str, report: &FeedbackReport) {
        let grade_colored = self.colorize_grade(&report.score.grade);
        println!("{}: {} ({})", source, report.score.value, grade_colored);
    }

    fn print_header(&self, source: &str, report: &FeedbackReport) {
        println!();
        println!("{}", format!("Prompt Quality Analysis: {}", source).bold());
        let mut line = format!(
            "   Words: {} | Sentences: {}",
            report.stats.words, report.stats.sentences
        );
        if report.stats.truncated {
            line.push_str(" | truncated");
        }
        if report.degraded {
            line.push_str(" | degraded (heuristics only)");
        }
        println!("{}", line);
        println!();
    }

    fn print_score(&self, report: &FeedbackReport) {
        let grade_str = self.colorize_grade(&report.score.grade);
        let score_bar = self.create_score_bar(report.score.value);

        println!("   Score: {} {}", score_bar, grade_str.bold());
        println!(
            "   {}",
            ScoreCalculator::grade_description(report.score.grade).dimmed()
        );
        println!();
    }

    fn print_breakdown(&self, report: &FeedbackReport) {
        println!("   {}", "Criterion Breakdown:".bold());

        for result in &report.criteria {
            let bar = self.create_mini_bar(result.score);
            let score_str = format!("{:>3}/100", result.score);
            let colored_score = if result.score >= 75 {
                score_str.green()
            } else if result.score >= 50 {
                score_str.yellow()
            } else {
                score_str.red()
            };
            println!("   {} {} {}", bar, colored_score, result.criterion.label());

            if self.verbose {
                let arrow = "↳".dimmed();
                for signal in &result.matched {
                    println!("       {} {}", arrow, format!("found {}", signal).dimmed());
                }
                for signal in &result.missing {
                    println!("       {} {}", arrow, format!("missing {}", signal).dimmed());
                }
            }
        }
        println!();
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Prompts evaluated: {}",
            stats.prompts_evaluated.to_string().bold()
        );
        println!(
            "   Average score:     {} ({})",
            stats.average_score.value.to_string().bold(),
            self.colorize_grade(&stats.average_score.grade)
        );
        println!("   Total improvements: {}", stats.total_improvements);
        println!();
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>3}%", "█".repeat(filled), "░".repeat(empty), score);

        if self.use_colors {
            if score >= 80 {
                bar.green().to_string()
            } else if score >= 60 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }

    fn create_mini_bar(&self, score: u8) -> String {
        let filled = (score as usize * 10) / 100;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
