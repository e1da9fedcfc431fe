/// Which heading the walk is currently under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Section {
    #[default]
    None,
    About,
    Experience,
    /// Terminates About/Experience accumulation; contributes no fields.
    Education,
}

impl Section {
    /// A marker line must be exactly one of the heading words.
    pub fn from_marker(line: &str) -> Option<Section> {
        match line {
            "About" => Some(Section::About),
            "Experience" => Some(Section::Experience),
            "Education" => Some(Section::Education),
            _ => None,
        }
    }
}
