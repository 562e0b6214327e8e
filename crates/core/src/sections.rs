//! The parse result: one optional section per top-level clause, plus the
//! line-oriented serializer.

use std::io;
use std::io::Write;

/// A top-level clause of a SELECT statement, in statement order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SectionKind {
    Modifiers,
    Columns,
    FirstInto,
    Tables,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Limit,
    Procedure,
    SecondInto,
    Flags,
}

impl SectionKind {
    /// Statement order, which is also the serialization order.
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Modifiers,
        SectionKind::Columns,
        SectionKind::FirstInto,
        SectionKind::Tables,
        SectionKind::Where,
        SectionKind::GroupBy,
        SectionKind::Having,
        SectionKind::OrderBy,
        SectionKind::Limit,
        SectionKind::Procedure,
        SectionKind::SecondInto,
        SectionKind::Flags,
    ];

    /// The snake_case wire name, e.g. `group_by`.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The verbatim text of one clause together with the placeholder offsets
/// found at its top level. Offsets are relative to the start of `content`,
/// not to the original statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SqlSection {
    content: String,
    placeholders: Vec<usize>,
}

impl SqlSection {
    pub fn new(content: impl Into<String>, placeholders: Vec<usize>) -> Self {
        Self {
            content: content.into(),
            placeholders,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn placeholders(&self) -> &[usize] {
        &self.placeholders
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// All clauses recovered from one statement. Clauses the statement does not
/// use stay `None`. The result owns copies of the clause text, so the source
/// buffer may be dropped once parsing returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParseResult {
    modifiers: Option<SqlSection>,
    columns: Option<SqlSection>,
    first_into: Option<SqlSection>,
    tables: Option<SqlSection>,
    r#where: Option<SqlSection>,
    group_by: Option<SqlSection>,
    having: Option<SqlSection>,
    order_by: Option<SqlSection>,
    limit: Option<SqlSection>,
    procedure: Option<SqlSection>,
    second_into: Option<SqlSection>,
    flags: Option<SqlSection>,
}

impl ParseResult {
    pub fn section(&self, kind: SectionKind) -> Option<&SqlSection> {
        match kind {
            SectionKind::Modifiers => self.modifiers.as_ref(),
            SectionKind::Columns => self.columns.as_ref(),
            SectionKind::FirstInto => self.first_into.as_ref(),
            SectionKind::Tables => self.tables.as_ref(),
            SectionKind::Where => self.r#where.as_ref(),
            SectionKind::GroupBy => self.group_by.as_ref(),
            SectionKind::Having => self.having.as_ref(),
            SectionKind::OrderBy => self.order_by.as_ref(),
            SectionKind::Limit => self.limit.as_ref(),
            SectionKind::Procedure => self.procedure.as_ref(),
            SectionKind::SecondInto => self.second_into.as_ref(),
            SectionKind::Flags => self.flags.as_ref(),
        }
    }

    pub fn set(&mut self, kind: SectionKind, section: SqlSection) {
        let slot = match kind {
            SectionKind::Modifiers => &mut self.modifiers,
            SectionKind::Columns => &mut self.columns,
            SectionKind::FirstInto => &mut self.first_into,
            SectionKind::Tables => &mut self.tables,
            SectionKind::Where => &mut self.r#where,
            SectionKind::GroupBy => &mut self.group_by,
            SectionKind::Having => &mut self.having,
            SectionKind::OrderBy => &mut self.order_by,
            SectionKind::Limit => &mut self.limit,
            SectionKind::Procedure => &mut self.procedure,
            SectionKind::SecondInto => &mut self.second_into,
            SectionKind::Flags => &mut self.flags,
        };
        *slot = Some(section);
    }

    /// Populated sections in statement order.
    pub fn sections(&self) -> impl Iterator<Item = (SectionKind, &SqlSection)> {
        SectionKind::ALL
            .iter()
            .filter_map(|&kind| self.section(kind).map(|section| (kind, section)))
    }

    /// Writes one line per populated section:
    ///
    /// ```text
    /// <name> <placeholder_count> (<placeholder_offset> )* <content_length> <content>
    /// ```
    ///
    /// The `limit` section is tracked during parsing but never serialized.
    pub fn serialize<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (kind, section) in self.sections() {
            if kind == SectionKind::Limit {
                continue;
            }

            write!(out, "{} {} ", kind.name(), section.placeholders().len())?;
            for offset in section.placeholders() {
                write!(out, "{offset} ")?;
            }
            write!(out, "{} ", section.len())?;
            out.write_all(section.content().as_bytes())?;
            out.write_all(b"\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(SectionKind::Modifiers.name(), "modifiers");
        assert_eq!(SectionKind::FirstInto.name(), "first_into");
        assert_eq!(SectionKind::GroupBy.name(), "group_by");
        assert_eq!(SectionKind::SecondInto.name(), "second_into");
    }

    #[test]
    fn sections_iterate_in_statement_order() {
        let mut result = ParseResult::default();
        result.set(SectionKind::Flags, SqlSection::new("FOR UPDATE", vec![]));
        result.set(SectionKind::Columns, SqlSection::new("1", vec![]));

        let kinds: Vec<_> = result.sections().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![SectionKind::Columns, SectionKind::Flags]);
    }
}
