//! Display columns derived from a cube's attribute list

use cubeattr_core::{title_case, Attribute, DataCube};

/// Width of every attribute column
pub const COLUMN_WIDTH: u32 = 170;

/// One table column per cube attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayColumn {
    /// Column label (the attribute name)
    pub label: String,

    /// Field key rows are looked up by (the attribute name)
    pub field: String,

    /// Column width
    pub width: u32,

    /// Attribute the column was derived from
    pub attribute: Attribute,

    /// Whether this is the cube's primary time attribute
    pub is_primary: bool,
}

/// What the header cell of a column shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDescriptor {
    /// Attribute name
    pub name: String,

    /// Title-cased type, with ` (primary)` appended for the primary time column
    pub type_label: String,

    /// Type icon identifier
    pub icon: String,
}

impl DisplayColumn {
    fn new(attribute: &Attribute, is_primary: bool) -> Self {
        Self {
            label: attribute.name.clone(),
            field: attribute.name.clone(),
            width: COLUMN_WIDTH,
            attribute: attribute.clone(),
            is_primary,
        }
    }

    /// Header cell contents
    pub fn header(&self) -> HeaderDescriptor {
        let mut type_label = title_case(self.attribute.attribute_type.as_str());
        if self.is_primary {
            type_label.push_str(" (primary)");
        }

        HeaderDescriptor {
            name: self.attribute.name.clone(),
            type_label,
            icon: self.attribute.attribute_type.icon_name(),
        }
    }
}

/// Derive the column list of a cube
///
/// One column per attribute, in attribute order. A column is primary when
/// its name exactly matches the cube's primary time attribute.
pub fn derive_columns(cube: &DataCube) -> Vec<DisplayColumn> {
    let primary = cube.primary_time_attribute();

    cube.attributes
        .iter()
        .map(|a| DisplayColumn::new(a, primary == Some(a.name.as_str())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubeattr_core::AttributeType;

    fn cube() -> DataCube {
        DataCube::new("wiki", "druid", "wikipedia").with_attributes(vec![
            Attribute::new("time", AttributeType::Time),
            Attribute::new("page", AttributeType::String),
            Attribute::new("tags", AttributeType::SetString),
        ])
    }

    #[test]
    fn one_column_per_attribute_in_order() {
        let cube = cube();
        let columns = derive_columns(&cube);

        assert_eq!(columns.len(), cube.attributes.len());
        for (column, attribute) in columns.iter().zip(&cube.attributes) {
            assert_eq!(&column.attribute, attribute);
            assert_eq!(column.label, attribute.name);
            assert_eq!(column.field, attribute.name);
            assert_eq!(column.width, COLUMN_WIDTH);
        }
    }

    #[test]
    fn no_primary_without_time_attribute() {
        assert!(derive_columns(&cube()).iter().all(|c| !c.is_primary));
    }

    #[test]
    fn primary_flag_is_exclusive() {
        let columns = derive_columns(&cube().with_time_attribute("time"));
        let primary: Vec<&str> = columns
            .iter()
            .filter(|c| c.is_primary)
            .map(|c| c.label.as_str())
            .collect();
        assert_eq!(primary, vec!["time"]);
    }

    #[test]
    fn primary_match_is_exact() {
        let columns = derive_columns(&cube().with_time_attribute("Time"));
        assert!(columns.iter().all(|c| !c.is_primary));
    }

    #[test]
    fn empty_cube_has_no_columns() {
        let cube = DataCube::new("empty", "druid", "nothing");
        assert!(derive_columns(&cube).is_empty());
    }

    #[test]
    fn header_contents() {
        let columns = derive_columns(&cube().with_time_attribute("time"));

        let time = columns[0].header();
        assert_eq!(time.name, "time");
        assert_eq!(time.type_label, "Time (primary)");
        assert_eq!(time.icon, "dim-time");

        let tags = columns[2].header();
        assert_eq!(tags.type_label, "Set/string");
        assert_eq!(tags.icon, "dim-set-string");
    }
}
