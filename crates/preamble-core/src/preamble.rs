// Static content: the Preamble to the Constitution of India and the terms
// highlighted for explanation.

pub const PREAMBLE_TEXT: &str = "\
WE, THE PEOPLE OF INDIA, having solemnly resolved to constitute India into a
SOVEREIGN SOCIALIST SECULAR DEMOCRATIC REPUBLIC and to secure to all its citizens:

JUSTICE, social, economic and political;
LIBERTY of thought, expression, belief, faith and worship;
EQUALITY of status and of opportunity; and to promote among them all
FRATERNITY assuring the dignity of the individual and the unity and integrity of the Nation;

IN OUR CONSTITUENT ASSEMBLY this twenty-sixth day of November, 1949, do HEREBY ADOPT,
ENACT AND GIVE TO OURSELVES THIS CONSTITUTION.";

/// Grouping shown next to each term and fed into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermCategory {
    Foundational,
    CoreValue,
}

impl TermCategory {
    pub fn label(self) -> &'static str {
        match self {
            TermCategory::Foundational => "Foundational",
            TermCategory::CoreValue => "Core Value",
        }
    }
}

/// A term from the preamble the user can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreambleTerm {
    pub label: &'static str,
    pub category: TermCategory,
}

impl PreambleTerm {
    pub const fn new(label: &'static str, category: TermCategory) -> Self {
        PreambleTerm { label, category }
    }
}

pub const PREAMBLE_TERMS: [PreambleTerm; 9] = [
    PreambleTerm::new("Sovereign", TermCategory::Foundational),
    PreambleTerm::new("Socialist", TermCategory::Foundational),
    PreambleTerm::new("Secular", TermCategory::Foundational),
    PreambleTerm::new("Democratic", TermCategory::Foundational),
    PreambleTerm::new("Republic", TermCategory::Foundational),
    PreambleTerm::new("Justice", TermCategory::CoreValue),
    PreambleTerm::new("Liberty", TermCategory::CoreValue),
    PreambleTerm::new("Equality", TermCategory::CoreValue),
    PreambleTerm::new("Fraternity", TermCategory::CoreValue),
];

/// Look up a highlighted term by label, ignoring ASCII case.
pub fn find_term(label: &str) -> Option<PreambleTerm> {
    PREAMBLE_TERMS
        .iter()
        .copied()
        .find(|t| t.label.eq_ignore_ascii_case(label))
}
