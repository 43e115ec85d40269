// Verification results.

/// One wrong or missing analysis for a surface form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    surface: String,
    analysis: String,
}

impl Mismatch {
    pub fn new(surface: impl Into<String>, analysis: impl Into<String>) -> Self {
        Mismatch {
            surface: surface.into(),
            analysis: analysis.into(),
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn analysis(&self) -> &str {
        &self.analysis
    }
}

/// Outcome of checking a grammar against expected analyses.
///
/// Overgeneration is an analysis the grammar produced but the fixture did
/// not expect; undergeneration is an expected analysis the grammar missed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifyReport {
    overgenerated: Vec<Mismatch>,
    undergenerated: Vec<Mismatch>,
    checked: usize,
}

impl VerifyReport {
    /// Empty report for `checked` surface forms.
    pub fn new(checked: usize) -> Self {
        VerifyReport {
            checked,
            ..VerifyReport::default()
        }
    }

    pub fn record_overgeneration(
        &mut self,
        surface: impl Into<String>,
        analysis: impl Into<String>,
    ) {
        self.overgenerated.push(Mismatch::new(surface, analysis));
    }

    pub fn record_undergeneration(
        &mut self,
        surface: impl Into<String>,
        analysis: impl Into<String>,
    ) {
        self.undergenerated.push(Mismatch::new(surface, analysis));
    }

    pub fn overgenerated(&self) -> &[Mismatch] {
        &self.overgenerated
    }

    pub fn undergenerated(&self) -> &[Mismatch] {
        &self.undergenerated
    }

    /// Number of surface forms checked.
    pub fn checked(&self) -> usize {
        self.checked
    }

    pub fn over_count(&self) -> usize {
        self.overgenerated.len()
    }

    pub fn under_count(&self) -> usize {
        self.undergenerated.len()
    }

    pub fn error_count(&self) -> usize {
        self.over_count() + self.under_count()
    }

    /// Errors per checked surface form. Zero for an empty fixture.
    pub fn error_rate(&self) -> f64 {
        if self.checked == 0 {
            return 0.0;
        }
        self.error_count() as f64 / self.checked as f64
    }

    pub fn passed(&self) -> bool {
        self.error_count() == 0
    }
}
