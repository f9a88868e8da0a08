//! Expand/collapse state for the department → HOD → faculty cards.
//!
//! State lives in a tree of owned nodes that mirrors the hierarchy. The HOD
//! node is the single writer for "which faculty card is open" under the
//! accordion policy. Collapsing a card drops the state of everything below it.

use serde::{Deserialize, Serialize};

use crate::model::hierarchy::{Department, Hod};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disclosure {
    #[default]
    Collapsed,
    Expanded,
}

impl Disclosure {
    pub fn from_open(open: bool) -> Self {
        if open {
            Disclosure::Expanded
        } else {
            Disclosure::Collapsed
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Disclosure::Collapsed => Disclosure::Expanded,
            Disclosure::Expanded => Disclosure::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Disclosure::Expanded
    }

    /// `×` when open (the rotated plus), `+` otherwise.
    pub fn marker(self) -> &'static str {
        match self {
            Disclosure::Collapsed => "+",
            Disclosure::Expanded => "×",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Department,
    Hod,
    Faculty,
}

impl CardKind {
    /// Accessible label of the card's toggle control.
    pub fn toggle_label(self, state: Disclosure) -> &'static str {
        match (self, state) {
            (CardKind::Department, Disclosure::Collapsed) => "Show HOD",
            (CardKind::Department, Disclosure::Expanded) => "Hide HOD",
            (CardKind::Hod, Disclosure::Collapsed) => "Show faculty",
            (CardKind::Hod, Disclosure::Expanded) => "Hide faculty",
            (CardKind::Faculty, Disclosure::Collapsed) => "Show attendance",
            (CardKind::Faculty, Disclosure::Expanded) => "Hide attendance",
        }
    }
}

/// How faculty cards under one HOD share disclosure state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacultyPolicy {
    /// At most one open faculty card per HOD.
    #[default]
    Accordion,
    /// Every faculty card toggles on its own.
    Independent,
}

/// Index path of a card inside the full (unfiltered) hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardPath {
    Department(usize),
    Hod(usize, usize),
    Faculty(usize, usize, usize),
}

impl CardPath {
    pub fn kind(self) -> CardKind {
        match self {
            CardPath::Department(_) => CardKind::Department,
            CardPath::Hod(..) => CardKind::Hod,
            CardPath::Faculty(..) => CardKind::Faculty,
        }
    }

    pub fn department(self) -> usize {
        match self {
            CardPath::Department(d) | CardPath::Hod(d, _) | CardPath::Faculty(d, _, _) => d,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyNode {
    pub id: String,
    pub disclosure: Disclosure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HodNode {
    pub id: String,
    pub disclosure: Disclosure,
    pub open_faculty: Option<String>,
    pub faculty: Vec<FacultyNode>,
}

impl HodNode {
    fn new(hod: &Hod) -> Self {
        Self {
            id: hod.id.clone(),
            disclosure: Disclosure::Collapsed,
            open_faculty: None,
            faculty: hod
                .faculties
                .iter()
                .map(|f| FacultyNode {
                    id: f.id.clone(),
                    disclosure: Disclosure::Collapsed,
                })
                .collect(),
        }
    }

    fn reset_children(&mut self) {
        self.open_faculty = None;
        for node in &mut self.faculty {
            node.disclosure = Disclosure::Collapsed;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentNode {
    pub id: String,
    pub disclosure: Disclosure,
    pub hods: Vec<HodNode>,
}

impl DepartmentNode {
    fn reset_children(&mut self) {
        for hod in &mut self.hods {
            hod.disclosure = Disclosure::Collapsed;
            hod.reset_children();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisclosureTree {
    policy: FacultyPolicy,
    departments: Vec<DepartmentNode>,
}

impl DisclosureTree {
    pub fn new(departments: &[Department], policy: FacultyPolicy, department_default: Disclosure) -> Self {
        Self {
            policy,
            departments: departments
                .iter()
                .map(|d| DepartmentNode {
                    id: d.id.clone(),
                    disclosure: department_default,
                    hods: d.hods.iter().map(HodNode::new).collect(),
                })
                .collect(),
        }
    }

    pub fn get(&self, path: CardPath) -> Option<Disclosure> {
        match path {
            CardPath::Department(d) => self.departments.get(d).map(|n| n.disclosure),
            CardPath::Hod(d, h) => self.hod(d, h).map(|n| n.disclosure),
            CardPath::Faculty(d, h, f) => {
                let hod = self.hod(d, h)?;
                let node = hod.faculty.get(f)?;
                Some(match self.policy {
                    FacultyPolicy::Accordion => {
                        Disclosure::from_open(hod.open_faculty.as_deref() == Some(node.id.as_str()))
                    }
                    FacultyPolicy::Independent => node.disclosure,
                })
            }
        }
    }

    pub fn is_expanded(&self, path: CardPath) -> bool {
        self.get(path).is_some_and(Disclosure::is_expanded)
    }

    /// Flip one card and return its new state, or `None` for a bad path.
    pub fn toggle(&mut self, path: CardPath) -> Option<Disclosure> {
        match path {
            CardPath::Department(d) => {
                let node = self.departments.get_mut(d)?;
                node.disclosure = node.disclosure.toggle();
                if !node.disclosure.is_expanded() {
                    node.reset_children();
                }
                Some(node.disclosure)
            }
            CardPath::Hod(d, h) => {
                let node = self.hod_mut(d, h)?;
                node.disclosure = node.disclosure.toggle();
                if !node.disclosure.is_expanded() {
                    node.reset_children();
                }
                Some(node.disclosure)
            }
            CardPath::Faculty(d, h, f) => {
                let policy = self.policy;
                let hod = self.hod_mut(d, h)?;
                let id = hod.faculty.get(f)?.id.clone();
                match policy {
                    FacultyPolicy::Accordion => {
                        let open = hod.open_faculty.as_deref() != Some(id.as_str());
                        hod.open_faculty = if open { Some(id) } else { None };
                        Some(Disclosure::from_open(open))
                    }
                    FacultyPolicy::Independent => {
                        let node = &mut hod.faculty[f];
                        node.disclosure = node.disclosure.toggle();
                        Some(node.disclosure)
                    }
                }
            }
        }
    }

    /// The faculty id tracked as open under a HOD (accordion policy).
    pub fn open_faculty(&self, d: usize, h: usize) -> Option<&str> {
        self.hod(d, h)?.open_faculty.as_deref()
    }

    fn hod(&self, d: usize, h: usize) -> Option<&HodNode> {
        self.departments.get(d)?.hods.get(h)
    }

    fn hod_mut(&mut self, d: usize, h: usize) -> Option<&mut HodNode> {
        self.departments.get_mut(d)?.hods.get_mut(h)
    }
}
