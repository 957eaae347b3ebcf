//! Build-step type catalog
//!
//! The catalog is the explicit registration table of build-step types known
//! to this build of the tool: a name plus a factory producing the step's
//! default settings. `gantry sync` reconciles the profile's step registry
//! against it.

use toml::value::Table;

/// A registered build-step type: registry name plus default-settings factory.
#[derive(Debug, Clone, Copy)]
pub struct StepType {
    name: &'static str,
    defaults: fn() -> Table,
}

impl StepType {
    pub const fn new(name: &'static str, defaults: fn() -> Table) -> Self {
        Self { name, defaults }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Produce a fresh default settings table for a new step record.
    pub fn defaults(&self) -> Table {
        (self.defaults)()
    }
}

/// Ordered table of registered step types.
///
/// Names are expected to be unique; registering a duplicate is not detected
/// here. During sync the first registration wins and later duplicates are
/// ignored, because the profile registry is keyed by name.
#[derive(Debug, Clone, Default)]
pub struct StepCatalog {
    types: Vec<StepType>,
}

impl StepCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, step_type: StepType) {
        self.types.push(step_type);
    }

    pub fn iter(&self) -> impl Iterator<Item = &StepType> {
        self.types.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Suggest the closest known name for a mistyped one (edit distance ≤ 2).
pub fn closest_name<'a, I>(unknown: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, usize)> = None;
    for candidate in candidates {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            Some((_, best_dist)) if dist >= best_dist => best,
            _ => Some((candidate, dist)),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a = a.as_bytes();
    let b = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b.len()]
}
