use pretty_assertions::assert_eq;
use sqlsect_core::{ParseResult, SectionKind, SqlSection, parse};

fn serialized(result: &ParseResult) -> String {
    let mut out = Vec::new();
    result.serialize(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn populated_sections_print_one_line_each() {
    let mut result = ParseResult::default();
    result.set(SectionKind::Columns, SqlSection::new("*", vec![]));
    result.set(SectionKind::Tables, SqlSection::new("table t", vec![]));
    result.set(SectionKind::Where, SqlSection::new("a = ?", vec![4]));

    assert_eq!(
        serialized(&result),
        "columns 0 1 *\n\
         tables 0 7 table t\n\
         where 1 4 5 a = ?\n"
    );
}

#[test]
fn all_sections_serialize_in_order_except_limit() {
    let mut result = ParseResult::default();
    result.set(
        SectionKind::Modifiers,
        SqlSection::new("DISTINCT SQL_CACHE", vec![]),
    );
    result.set(SectionKind::Columns, SqlSection::new("id, SUM(money) m", vec![]));
    result.set(SectionKind::Tables, SqlSection::new("table t", vec![]));
    result.set(SectionKind::Where, SqlSection::new("a = 1", vec![]));
    result.set(SectionKind::GroupBy, SqlSection::new("id ASC", vec![]));
    result.set(SectionKind::Having, SqlSection::new("money > 0", vec![]));
    result.set(SectionKind::OrderBy, SqlSection::new("money DESC", vec![]));
    result.set(SectionKind::Limit, SqlSection::new("1", vec![]));
    result.set(
        SectionKind::SecondInto,
        SqlSection::new("INTO @user_id, @user_money", vec![]),
    );
    result.set(SectionKind::Flags, SqlSection::new("LOCK IN SHARE MODE", vec![]));

    assert_eq!(
        serialized(&result),
        "modifiers 0 18 DISTINCT SQL_CACHE\n\
         columns 0 16 id, SUM(money) m\n\
         tables 0 7 table t\n\
         where 0 5 a = 1\n\
         group_by 0 6 id ASC\n\
         having 0 9 money > 0\n\
         order_by 0 10 money DESC\n\
         second_into 0 26 INTO @user_id, @user_money\n\
         flags 0 18 LOCK IN SHARE MODE\n"
    );
}

#[test]
fn parse_then_serialize_round_trip() {
    let result = parse("SELECT * FROM table t WHERE a = ? LIMIT 1").unwrap();

    assert_eq!(
        serialized(&result),
        "columns 0 1 *\n\
         tables 0 7 table t\n\
         where 1 4 5 a = ?\n"
    );
}

#[test]
fn multiple_placeholder_offsets_are_space_separated() {
    let result = parse("SELECT ?, ? FROM t").unwrap();

    assert_eq!(
        serialized(&result),
        "columns 2 0 3 4 ?, ?\n\
         tables 0 1 t\n"
    );
}

#[test]
fn empty_result_serializes_to_nothing() {
    assert_eq!(serialized(&ParseResult::default()), "");
}
