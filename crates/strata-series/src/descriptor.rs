//! Variable descriptors and general keys.
//!
//! A descriptor names one summary variable: its keyword (`WOPR`), the
//! well or group that owns it, a numeric qualifier (region number, cell
//! number), a unit and the value new ministeps start with. The *general
//! key* is the string callers use to look it up:
//!
//! | Kind        | Key                      |
//! |-------------|--------------------------|
//! | field, misc | `FOPT`                   |
//! | well, group | `WWCT:OP-1`              |
//! | region      | `RPR:3`                  |
//! | block       | `BPR:5,5,3` or `BPR:123` |
//! | completion  | `CWIT:INJ:2,2,1`         |
//! | segment     | `SOFR:OP-1:4`            |

use strata_core::Ijk;

/// Owner name written for variables that have no well or group.
pub const DUMMY_WELL: &str = ":+:+:+:+";

/// Keywords that are miscellaneous despite their first letter.
const MISC_KEYWORDS: &[&str] = &[
    "NEWTON", "NAIMFRAC", "NLINEARS", "NLINSMIN", "NLINSMAX", "ELAPSED", "MAXDPR", "MAXDSO",
    "MAXDSG", "MAXDSW", "STEPTYPE", "WNEWTON",
];

/// Category of a summary variable, inferred from its keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// `A...`: analytic aquifer, qualified by aquifer number.
    Aquifer,
    /// `B...`: grid block, qualified by cell number.
    Block,
    /// `C...`: well completion, owned by a well and qualified by cell.
    Completion,
    /// `F...`: whole field.
    Field,
    /// `G...`: well group.
    Group,
    /// `N...`: network node.
    Network,
    /// `R...`: region, qualified by region number.
    Region,
    /// `S...`: multi-segment well segment.
    Segment,
    /// `W...`: well.
    Well,
    /// Anything else, including `TIME`.
    Misc,
}

impl VarKind {
    /// Classify a keyword by its leading letter.
    pub fn of(keyword: &str) -> Self {
        if MISC_KEYWORDS.contains(&keyword) {
            return Self::Misc;
        }
        match keyword.as_bytes().first() {
            Some(b'A') => Self::Aquifer,
            Some(b'B') => Self::Block,
            Some(b'C') => Self::Completion,
            Some(b'F') => Self::Field,
            Some(b'G') => Self::Group,
            Some(b'N') => Self::Network,
            Some(b'R') => Self::Region,
            Some(b'S') => Self::Segment,
            Some(b'W') => Self::Well,
            _ => Self::Misc,
        }
    }

    fn has_owner(self) -> bool {
        matches!(
            self,
            Self::Completion | Self::Group | Self::Segment | Self::Well
        )
    }
}

/// One summary variable.
#[derive(Clone, Debug, PartialEq)]
pub struct VariableDescriptor {
    keyword: String,
    owner: Option<String>,
    num: i32,
    unit: String,
    default_value: f32,
}

impl VariableDescriptor {
    /// A descriptor with no owner, qualifier 0, no unit and default 0.0.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            owner: None,
            num: 0,
            unit: String::new(),
            default_value: 0.0,
        }
    }

    /// Set the owning well or group. An empty name or [`DUMMY_WELL`] means
    /// no owner.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        let trimmed = owner.trim();
        self.owner = if trimmed.is_empty() || trimmed == DUMMY_WELL {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Set the numeric qualifier.
    pub fn num(mut self, num: i32) -> Self {
        self.num = num;
        self
    }

    /// Set the unit string.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Set the value new ministeps start with.
    pub fn default_value(mut self, value: f32) -> Self {
        self.default_value = value;
        self
    }

    /// Keyword, e.g. `WOPR`.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Owning well or group, if any.
    pub fn owner_name(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Numeric qualifier (0 when unused).
    pub fn qualifier(&self) -> i32 {
        self.num
    }

    /// Unit string.
    pub fn unit_name(&self) -> &str {
        &self.unit
    }

    /// Value new ministeps start with.
    pub fn initial_value(&self) -> f32 {
        self.default_value
    }

    /// Variable category.
    pub fn kind(&self) -> VarKind {
        VarKind::of(&self.keyword)
    }

    /// Whether this is the elapsed-time variable, filled automatically on
    /// every ministep.
    pub fn is_time(&self) -> bool {
        self.keyword == "TIME"
    }

    /// The general key for lookups, or `None` for variables that cannot be
    /// addressed (an owned kind without a real owner).
    ///
    /// With `grid_dims`, block and completion qualifiers are rendered as
    /// 1-based `i,j,k`.
    pub fn general_key(&self, grid_dims: Option<[usize; 3]>) -> Option<String> {
        let kind = self.kind();
        if kind.has_owner() && self.owner.is_none() {
            return None;
        }
        let kw = &self.keyword;
        let owner = self.owner.as_deref().unwrap_or_default();
        let key = match kind {
            VarKind::Field | VarKind::Network | VarKind::Misc => kw.clone(),
            VarKind::Well | VarKind::Group => format!("{kw}:{owner}"),
            VarKind::Region | VarKind::Aquifer => format!("{kw}:{}", self.num),
            VarKind::Block => format!("{kw}:{}", self.cell(grid_dims)),
            VarKind::Completion => format!("{kw}:{owner}:{}", self.cell(grid_dims)),
            VarKind::Segment => format!("{kw}:{owner}:{}", self.num),
        };
        Some(key)
    }

    fn cell(&self, grid_dims: Option<[usize; 3]>) -> String {
        match grid_dims.and_then(|d| cell_from_num(self.num, d)) {
            Some(ijk) => ijk.to_string(),
            None => self.num.to_string(),
        }
    }
}

/// Decode a 1-based cell number into a 0-based coordinate.
pub fn cell_from_num(num: i32, [nx, ny, nz]: [usize; 3]) -> Option<Ijk> {
    let global = usize::try_from(num).ok()?.checked_sub(1)?;
    if nx == 0 || ny == 0 || global >= nx * ny * nz {
        return None;
    }
    Some(Ijk::new(global % nx, (global / nx) % ny, global / (nx * ny)))
}

/// Encode a 0-based coordinate as a 1-based cell number.
pub fn num_from_cell(ijk: Ijk, [nx, ny, _]: [usize; 3]) -> i32 {
    (ijk.i + ijk.j * nx + ijk.k * nx * ny + 1) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn kinds_from_keyword() {
        assert_eq!(VarKind::of("FOPT"), VarKind::Field);
        assert_eq!(VarKind::of("WWCT"), VarKind::Well);
        assert_eq!(VarKind::of("BPR"), VarKind::Block);
        assert_eq!(VarKind::of("TIME"), VarKind::Misc);
        assert_eq!(VarKind::of("NEWTON"), VarKind::Misc);
        assert_eq!(VarKind::of("WNEWTON"), VarKind::Misc);
        assert_eq!(VarKind::of(""), VarKind::Misc);
    }

    #[test]
    fn general_keys() {
        let dims = Some([10, 10, 3]);
        let key = |d: VariableDescriptor| d.general_key(dims);
        assert_eq!(key(VariableDescriptor::new("FOPT")).as_deref(), Some("FOPT"));
        assert_eq!(
            key(VariableDescriptor::new("WWCT").owner("OP-1")).as_deref(),
            Some("WWCT:OP-1")
        );
        assert_eq!(key(VariableDescriptor::new("RPR").num(3)).as_deref(), Some("RPR:3"));
        // Cell 123 in a 10x10 grid is (3,3,2) 1-based.
        assert_eq!(
            key(VariableDescriptor::new("BPR").num(123)).as_deref(),
            Some("BPR:3,3,2")
        );
        assert_eq!(
            VariableDescriptor::new("BPR").num(123).general_key(None).as_deref(),
            Some("BPR:123")
        );
        assert_eq!(
            key(VariableDescriptor::new("CWIT").owner("INJ").num(12)).as_deref(),
            Some("CWIT:INJ:2,2,1")
        );
    }

    #[test]
    fn dummy_owner_is_unaddressable() {
        let d = VariableDescriptor::new("WOPR").owner(DUMMY_WELL);
        assert_eq!(d.owner_name(), None);
        assert_eq!(d.general_key(None), None);
        assert_eq!(VariableDescriptor::new("GOPR").general_key(None), None);
    }

    #[test]
    fn cell_numbers_roundtrip() {
        let dims = [4, 3, 2];
        for num in 1..=24 {
            let ijk = cell_from_num(num, dims).unwrap();
            assert_eq!(num_from_cell(ijk, dims), num);
        }
        assert_eq!(cell_from_num(0, dims), None);
        assert_eq!(cell_from_num(25, dims), None);
    }

    proptest! {
        #[test]
        fn cell_number_inverts(nx in 1usize..50, ny in 1usize..50, nz in 1usize..20, seed in 0usize..1_000_000) {
            let dims = [nx, ny, nz];
            let num = (seed % (nx * ny * nz)) as i32 + 1;
            let ijk = cell_from_num(num, dims).unwrap();
            prop_assert!(ijk.i < nx && ijk.j < ny && ijk.k < nz);
            prop_assert_eq!(num_from_cell(ijk, dims), num);
        }
    }
}
