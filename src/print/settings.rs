use super::PrintIntent;
use crate::render::PrintMode;

/// Soft ceiling on the copy count.
///
/// Used for input sanity in the prompt only; the orchestrator never rejects
/// a larger value.
pub const SOFT_COPY_CAP: usize = 50;

/// Normalizes a raw copy count to a positive integer.
///
/// Sub-1 and non-finite values clamp to 1; fractional counts truncate
/// towards zero. Never fails: a print job always has at least one copy.
#[must_use]
pub fn normalize_copies(raw: f64) -> usize {
    if raw.is_finite() && raw >= 1.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            raw.floor() as usize
        }
    } else {
        1
    }
}

/// Parses free-text copy input, clamping to a positive integer.
#[must_use]
pub fn parse_copies(input: &str) -> usize {
    input.trim().parse::<f64>().map_or(1, normalize_copies)
}

/// Configuration captured by the print settings prompt.
///
/// Constructed fresh each time the prompt opens, so the copy count always
/// restarts at 1, and discarded after confirm or cancel. The intent is
/// purely advisory: it selects the guidance text, never the dispatch
/// behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintSettings {
    copies: usize,
    mode: PrintMode,
    intent: PrintIntent,
}

impl PrintSettings {
    /// Opens a fresh prompt for the given mode and intent.
    #[must_use]
    pub const fn open(mode: PrintMode, intent: PrintIntent) -> Self {
        Self {
            copies: 1,
            mode,
            intent,
        }
    }

    /// The configured copy count.
    #[must_use]
    pub const fn copies(&self) -> usize {
        self.copies
    }

    /// The document mode the prompt was opened for.
    #[must_use]
    pub const fn mode(&self) -> PrintMode {
        self.mode
    }

    /// The advisory intent the prompt was opened with.
    #[must_use]
    pub const fn intent(&self) -> PrintIntent {
        self.intent
    }

    /// Adds one copy.
    pub const fn increment(&mut self) {
        self.copies += 1;
    }

    /// Removes one copy, floored at a single copy.
    pub const fn decrement(&mut self) {
        if self.copies > 1 {
            self.copies -= 1;
        }
    }

    /// Replaces the copy count from free-text input, clamping as needed.
    pub fn set_copies_input(&mut self, input: &str) {
        self.copies = parse_copies(input);
    }

    /// Guidance lines shown beneath the copy selector.
    #[must_use]
    pub fn guidance(&self) -> Vec<&'static str> {
        let mut lines = vec![match self.intent {
            PrintIntent::Print => "Select your physical printer in the print dialog.",
            PrintIntent::SavePdf => {
                "When the print dialog appears, switch the destination to \"Save as PDF\"."
            }
        }];
        if self.mode == PrintMode::Label {
            lines.push("Set the printer paper size to the custom 350x200px sticker.");
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_counts_are_clamped_never_rejected() {
        assert_eq!(normalize_copies(0.0), 1);
        assert_eq!(normalize_copies(-5.0), 1);
        assert_eq!(normalize_copies(f64::NAN), 1);
        assert_eq!(normalize_copies(f64::INFINITY), 1);
        assert_eq!(normalize_copies(1.0), 1);
        assert_eq!(normalize_copies(3.7), 3);
        assert_eq!(normalize_copies(42.0), 42);
    }

    #[test]
    fn free_text_input_is_clamped() {
        assert_eq!(parse_copies("abc"), 1);
        assert_eq!(parse_copies(""), 1);
        assert_eq!(parse_copies(" 4 "), 4);
        assert_eq!(parse_copies("3.7"), 3);
        assert_eq!(parse_copies("-2"), 1);
    }

    #[test]
    fn prompt_opens_with_one_copy() {
        let settings = PrintSettings::open(PrintMode::Form, PrintIntent::Print);
        assert_eq!(settings.copies(), 1);

        // A fresh open never inherits the previous configuration.
        let mut used = PrintSettings::open(PrintMode::Form, PrintIntent::Print);
        used.set_copies_input("7");
        drop(used);
        let fresh = PrintSettings::open(PrintMode::Form, PrintIntent::Print);
        assert_eq!(fresh.copies(), 1);
    }

    #[test]
    fn decrement_floors_at_one() {
        let mut settings = PrintSettings::open(PrintMode::Label, PrintIntent::Print);
        settings.decrement();
        assert_eq!(settings.copies(), 1);
        settings.increment();
        settings.increment();
        settings.decrement();
        assert_eq!(settings.copies(), 2);
    }

    #[test]
    fn guidance_follows_intent_and_mode() {
        let pdf = PrintSettings::open(PrintMode::Form, PrintIntent::SavePdf);
        assert!(pdf.guidance()[0].contains("Save as PDF"));
        assert_eq!(pdf.guidance().len(), 1);

        let label = PrintSettings::open(PrintMode::Label, PrintIntent::Print);
        assert!(label.guidance()[0].contains("physical printer"));
        assert!(label.guidance()[1].contains("350x200px"));
    }
}
