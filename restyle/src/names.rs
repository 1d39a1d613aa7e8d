//! Descriptive strings from the `name` table.

use std::{fmt, str::FromStr};

use skrifa::{string::StringId, FontRef, MetadataProvider};
use write_fonts::{
    from_obj::ToOwnedTable,
    read::{FontRef as SourceFont, TableProvider as _},
    tables::name::{Name, NameRecord},
    types::NameId,
    FontBuilder,
};

use crate::{
    error::Error,
    font::{compile_error, copy_tables},
};

/// One of the descriptive name table entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NameField {
    Copyright,
    Family,
    Subfamily,
    FullName,
    Version,
    Manufacturer,
    Designer,
    Description,
    License,
}

impl NameField {
    /// All fields, in name id order.
    pub const ALL: [NameField; 9] = [
        NameField::Copyright,
        NameField::Family,
        NameField::Subfamily,
        NameField::FullName,
        NameField::Version,
        NameField::Manufacturer,
        NameField::Designer,
        NameField::Description,
        NameField::License,
    ];

    /// The raw name id.
    pub fn id(self) -> u16 {
        match self {
            NameField::Copyright => 0,
            NameField::Family => 1,
            NameField::Subfamily => 2,
            NameField::FullName => 4,
            NameField::Version => 5,
            NameField::Manufacturer => 8,
            NameField::Designer => 9,
            NameField::Description => 10,
            NameField::License => 13,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NameField::Copyright => "copyright",
            NameField::Family => "family",
            NameField::Subfamily => "subfamily",
            NameField::FullName => "full-name",
            NameField::Version => "version",
            NameField::Manufacturer => "manufacturer",
            NameField::Designer => "designer",
            NameField::Description => "description",
            NameField::License => "license",
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NameField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NameField::ALL
            .into_iter()
            .find(|field| field.label() == s)
            .ok_or_else(|| Error::UnknownNameField(s.to_owned()))
    }
}

/// The human readable metadata of a font.
///
/// Each field holds the English entry for its name id, or the first entry
/// if there is no English one. Missing entries are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontMetadata {
    pub family: String,
    pub subfamily: String,
    pub full_name: String,
    pub version: String,
    pub copyright: String,
    pub manufacturer: String,
    pub designer: String,
    pub description: String,
    pub license: String,
}

impl FontMetadata {
    pub fn from_font(font: &FontRef) -> Self {
        let mut meta = FontMetadata::default();
        for field in NameField::ALL {
            *meta.field_mut(field) = font
                .localized_strings(StringId::new(field.id()))
                .english_or_first()
                .map(|s| s.to_string())
                .unwrap_or_default();
        }
        meta
    }

    pub fn get(&self, field: NameField) -> &str {
        match field {
            NameField::Copyright => &self.copyright,
            NameField::Family => &self.family,
            NameField::Subfamily => &self.subfamily,
            NameField::FullName => &self.full_name,
            NameField::Version => &self.version,
            NameField::Manufacturer => &self.manufacturer,
            NameField::Designer => &self.designer,
            NameField::Description => &self.description,
            NameField::License => &self.license,
        }
    }

    fn field_mut(&mut self, field: NameField) -> &mut String {
        match field {
            NameField::Copyright => &mut self.copyright,
            NameField::Family => &mut self.family,
            NameField::Subfamily => &mut self.subfamily,
            NameField::FullName => &mut self.full_name,
            NameField::Version => &mut self.version,
            NameField::Manufacturer => &mut self.manufacturer,
            NameField::Designer => &mut self.designer,
            NameField::Description => &mut self.description,
            NameField::License => &mut self.license,
        }
    }

    /// Fields paired with their values, in name id order.
    pub fn fields(&self) -> impl Iterator<Item = (NameField, &str)> + '_ {
        NameField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl fmt::Display for FontMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, value) in self.fields() {
            if !value.is_empty() {
                writeln!(f, "{:>12}: {value}", field.label())?;
            }
        }
        Ok(())
    }
}

/// Parses a `field=value` assignment.
pub fn parse_assignment(text: &str) -> Result<(NameField, String), Error> {
    let (field, value) = text
        .split_once('=')
        .ok_or_else(|| Error::UnknownNameField(text.to_owned()))?;
    Ok((field.trim().parse()?, value.to_owned()))
}

/// Returns a copy of `font` with the given name entries replaced.
///
/// Every existing record for a field is rewritten, whatever its platform
/// or language. A field without records gets a new Windows English one.
/// All other tables are copied unchanged.
pub fn set_names(font: &SourceFont, changes: &[(NameField, String)]) -> Result<Vec<u8>, Error> {
    let mut name: Name = font.name().map_err(Error::ReadTables)?.to_owned_table();
    for (field, value) in changes {
        let id = NameId::new(field.id());
        let mut found = false;
        for record in name.name_record.iter_mut().filter(|r| r.name_id == id) {
            record.string = value.clone().into();
            found = true;
        }
        if !found {
            name.name_record
                .push(NameRecord::new(3, 1, 0x409, id, value.clone().into()));
        }
        log::debug!("set {field} to {value:?}");
    }
    name.name_record.sort();

    let mut output = FontBuilder::new();
    output
        .add_table(&name)
        .map_err(|e| compile_error("name", e))?;
    copy_tables(&mut output, font, |_| false);
    Ok(output.build())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn display_skips_missing_fields() {
        let meta = FontMetadata {
            family: "Vazirmatn".into(),
            version: "Version 33.003".into(),
            ..Default::default()
        };
        assert_eq!(
            meta.to_string(),
            "      family: Vazirmatn\n     version: Version 33.003\n"
        );
    }

    #[test]
    fn field_labels_round_trip() {
        for field in NameField::ALL {
            assert_eq!(field.label().parse::<NameField>().unwrap(), field);
        }
        assert!(matches!(
            "nickname".parse::<NameField>(),
            Err(Error::UnknownNameField(_))
        ));
    }

    #[test]
    fn assignments() {
        let (field, value) = parse_assignment("full-name=My Font Bold").unwrap();
        assert_eq!(field, NameField::FullName);
        assert_eq!(value, "My Font Bold");
        // only the first '=' separates
        assert_eq!(
            parse_assignment("license=a=b").unwrap(),
            (NameField::License, "a=b".to_string())
        );
        assert!(parse_assignment("family").is_err());
    }
}
