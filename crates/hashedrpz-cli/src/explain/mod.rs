//! Explanations: what the hasher does, level by level.

use colored::Colorize;
use hashedrpz_core::LengthBudget;
use std::io::Write;

/// Explanation builder.
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    budget: Option<String>,
}

impl Explain {
    fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            what_happens: Vec::new(),
            budget: None,
        }
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn budget(mut self, origin: &str, budget: LengthBudget) -> Self {
        self.budget = Some(format!(
            "{} characters (255 - 16 - 1 - len({origin}))",
            budget.max()
        ));
        self
    }

    /// Print the explanation to stderr.
    pub fn print(&self) {
        let mut err = std::io::stderr().lock();
        let _ = self.write_to(&mut err);
    }

    fn write_to(&self, w: &mut impl Write) -> std::io::Result<()> {
        writeln!(w)?;
        writeln!(w, "{}", "=== What This Does ===".bold().cyan())?;
        writeln!(w, "{}", self.description)?;
        writeln!(w)?;

        if !self.what_happens.is_empty() {
            writeln!(w, "{}", "How it works:".bold())?;
            for (i, step) in self.what_happens.iter().enumerate() {
                writeln!(w, "  {}. {}", i + 1, step)?;
            }
            writeln!(w)?;
        }

        if let Some(budget) = &self.budget {
            writeln!(w, "{} {}", "Length budget:".bold(), budget)?;
            writeln!(w)?;
        }

        Ok(())
    }

    /// Explain the hash command for names placed under `origin`.
    pub fn hash(origin: &str, budget: LengthBudget) -> Self {
        Self::new(
            "Turns each domain name into a keyed hash per label, so the list \
             can be published without revealing the domains it contains.",
        )
        .step("Labels are processed right to left, starting at the TLD")
        .step("Each label is hashed together with all labels to its right")
        .step("Labels under 4 bytes get a 4 byte digest, under 8 bytes 8, else 16")
        .step("Digests are base32hex encoded (lowercase, no padding)")
        .step("A leading '*' label is kept as is")
        .budget(origin, budget)
    }
}

/// Prints each hashed level of a name to stderr.
pub struct LevelTrace {
    levels: usize,
}

impl LevelTrace {
    /// Start tracing `input`.
    pub fn start(input: &str) -> Self {
        eprintln!("{} {}", "Name:".bold(), input.cyan());
        Self { levels: 0 }
    }

    /// Observer callback for one hashed level.
    pub fn level(&mut self, suffix: &str, partial: &str) {
        self.levels += 1;
        eprintln!(
            "  {:>2}. {:>40} {} {}",
            self.levels,
            suffix,
            "->".dimmed(),
            partial.green()
        );
    }

    /// Number of levels seen so far
    pub const fn levels(&self) -> usize {
        self.levels
    }

    /// End the trace with the number of levels seen.
    pub fn finish(self) {
        eprintln!("  {} {}", "levels:".dimmed(), self.levels());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_explanation_mentions_budget() {
        colored::control::set_override(false);

        let budget = LengthBudget::from_origin("rpz.example.net").unwrap();
        let mut out = Vec::new();
        Explain::hash("rpz.example.net", budget)
            .write_to(&mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("=== What This Does ==="));
        assert!(out.contains("  1. Labels are processed right to left"));
        assert!(out.contains("Length budget: 223 characters"));
    }

    #[test]
    fn counts_levels() {
        let mut trace = LevelTrace::start("www.example.net");
        trace.level("net", "1qpnbgg");
        trace.level("example.net", "kj8qsm2gn1o42.1qpnbgg");
        assert_eq!(trace.levels(), 2);
        trace.finish();
    }
}
