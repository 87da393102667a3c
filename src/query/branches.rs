/// Which branches the repository view lists and which one is selected.
///
/// The default branch is always listed first. "Show more" grows the list in
/// steps of the display limit until every branch is visible.
#[derive(Debug, Clone)]
pub struct BranchSelector {
    default_branch: String,
    others: Vec<String>,
    step: usize,
    limit: usize,
    selected: String,
}

impl BranchSelector {
    pub fn new(default_branch: &str, branches: &[String], step: usize) -> Self {
        let others: Vec<String> = branches
            .iter()
            .filter(|name| name.as_str() != default_branch)
            .cloned()
            .collect();
        let step = step.max(1);
        Self {
            default_branch: default_branch.to_string(),
            limit: step.min(others.len() + 1),
            others,
            step,
            selected: default_branch.to_string(),
        }
    }

    /// Total branches, default included.
    pub fn len(&self) -> usize {
        self.others.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn visible(&self) -> Vec<&str> {
        std::iter::once(self.default_branch.as_str())
            .chain(self.others.iter().map(String::as_str))
            .take(self.limit)
            .collect()
    }

    pub fn has_more(&self) -> bool {
        self.limit < self.len()
    }

    pub fn show_more(&mut self) {
        self.limit = (self.limit + self.step).min(self.len());
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_default_selected(&self) -> bool {
        self.selected == self.default_branch
    }

    /// Select `branch`. Unknown names are ignored and return false.
    pub fn select(&mut self, branch: &str) -> bool {
        if branch == self.default_branch || self.others.iter().any(|b| b == branch) {
            self.selected = branch.to_string();
            true
        } else {
            false
        }
    }
}
