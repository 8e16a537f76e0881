use pretty_assertions::assert_eq;

use catalog::{
    config::Config,
    traits::DisplayTerminal,
    types::{
        author::{canonical_path_for, Author, AuthorView, NAME_MAX_LENGTH},
        text::Text,
        timestamp::{OptionalTimestamp, Timestamp},
        uuid::Uuid,
    },
};

fn date(year: i32, month: u32, day: u32) -> Timestamp {
    Timestamp::from_ymd(year, month, day).unwrap()
}

fn austen() -> Author {
    Author::new("Jane", "Austen")
        .born(date(1775, 12, 16))
        .died(date(1817, 7, 18))
}

#[test]
fn full_name_family_first() {
    assert_eq!(austen().full_name(), "Austen, Jane");
}

#[test]
fn full_name_requires_both_parts() {
    let mut author = austen();
    author.first_name = None;
    assert_eq!(author.full_name(), "");

    let mut author = austen();
    author.family_name = Some(Text("".into()));
    assert_eq!(author.full_name(), "");

    let author = Author::default();
    assert_eq!(author.full_name(), "");
}

#[test]
fn iso_dates() {
    let author = austen();
    assert_eq!(author.birth_date_iso(), "1775-12-16");
    assert_eq!(author.death_date_iso(), "1817-07-18");

    let author = Author::new("Ursula", "Le Guin");
    assert_eq!(author.birth_date_iso(), "");
    assert_eq!(author.death_date_iso(), "");
}

#[test]
fn lifespan_keeps_separator() {
    let base = Author::new("Ada", "Lovelace");
    assert_eq!(base.lifespan(), " - ");
    assert_eq!(base.clone().born(date(1920, 1, 2)).lifespan(), "1920 - ");
    assert_eq!(base.clone().died(date(1950, 3, 4)).lifespan(), " - 1950");
    assert_eq!(
        base.born(date(1920, 1, 2)).died(date(1950, 3, 4)).lifespan(),
        "1920 - 1950"
    );
}

#[test]
fn lifespan_year_is_not_padded() {
    let author = Author::new("Alfred", "of Wessex").born(date(849, 1, 1));
    assert_eq!(author.lifespan(), "849 - ");
    assert_eq!(author.birth_date_iso(), "0849-01-01");
}

#[test]
fn canonical_path() {
    assert_eq!(canonical_path_for("abc123"), "/catalog/author/abc123");

    let id = uuid::uuid!("2334916b-e46c-4acf-ba6c-c2145f8e4be8");
    let author = Author {
        id: Uuid(id),
        ..austen()
    };
    assert_eq!(
        author.canonical_path(),
        "/catalog/author/2334916b-e46c-4acf-ba6c-c2145f8e4be8"
    );
}

#[test]
fn accessors_are_stable() {
    let empty = Author {
        first_name: None,
        family_name: None,
        ..Author::default()
    };
    for author in [austen(), empty] {
        assert_eq!(author.full_name(), author.full_name());
        assert_eq!(author.lifespan(), author.lifespan());
        assert_eq!(author.birth_date_iso(), author.birth_date_iso());
        assert_eq!(author.death_date_iso(), author.death_date_iso());
        assert_eq!(author.canonical_path(), author.canonical_path());
    }
}

#[test]
fn derived_fields_follow_stored_fields() {
    let mut author = austen();
    author.first_name = Some(Text("Cassandra".into()));
    author.date_of_death = OptionalTimestamp(None);
    assert_eq!(author.full_name(), "Austen, Cassandra");
    assert_eq!(author.lifespan(), "1775 - ");
}

#[test]
fn view_includes_derived_fields() {
    let author = austen();
    assert_eq!(
        author.view(),
        AuthorView {
            id:            author.id.to_string(),
            first_name:    Some("Jane".into()),
            family_name:   Some("Austen".into()),
            name:          "Austen, Jane".into(),
            date_of_birth: "1775-12-16".into(),
            date_of_death: "1817-07-18".into(),
            lifespan:      "1775 - 1817".into(),
            url:           author.canonical_path(),
        }
    );

    let json = serde_json::to_value(author.view()).unwrap();
    assert_eq!(json["url"], serde_json::json!(author.canonical_path()));
}

#[test]
fn validate_names() {
    assert!(austen().validate().is_ok());

    let mut author = austen();
    author.family_name = None;
    assert!(author.validate().is_err());

    let mut author = austen();
    author.first_name = Some(Text("".into()));
    assert!(author.validate().is_err());

    let at_limit = "é".repeat(NAME_MAX_LENGTH);
    assert!(Author::new(at_limit.as_str(), "Austen").validate().is_ok());

    let too_long = "a".repeat(NAME_MAX_LENGTH + 1);
    let err = Author::new("Jane", too_long).validate().unwrap_err();
    assert!(err.to_string().contains("family_name"));
}

#[test]
fn whitespace_name_is_present() {
    let author = Author::new(" ", "Austen");
    assert_eq!(author.full_name(), "Austen,  ");
    assert!(author.validate().is_ok());
}

#[test]
fn name_length_counts_utf16_units() {
    // each emoji is a surrogate pair
    let author = Author::new("😀".repeat(50).as_str(), "Austen");
    assert!(author.validate().is_ok());

    let author = Author::new("😀".repeat(60).as_str(), "Austen");
    let err = author.validate().unwrap_err();
    assert!(err.to_string().contains("first_name"));
}

#[test]
fn validate_ignores_date_order() {
    let author = Author::new("Jane", "Austen")
        .born(date(1817, 7, 18))
        .died(date(1775, 12, 16));
    assert!(author.validate().is_ok());
}

#[test]
fn display_falls_back_to_id() {
    assert_eq!(austen().to_string(), "Austen, Jane");

    let author = Author::default();
    assert_eq!(author.to_string(), author.id.to_string());
}

#[test]
fn display_terminal() {
    let config = Config::default();
    let s = austen().fmt_to_string(&config).unwrap();
    assert!(s.contains("Austen, Jane"));
    assert!(s.contains("1775 - 1817"));

    let s = Author::new("Ursula", "Le Guin").fmt_to_string(&config).unwrap();
    assert!(!s.contains(" - "));
}

#[test]
fn iso_date_extended_years() {
    assert_eq!(date(9999, 12, 31).iso_date(), "9999-12-31");
    assert_eq!(date(10000, 1, 2).iso_date(), "+010000-01-02");
}

#[test]
fn parse_dates() {
    assert_eq!(Timestamp::parse("1920-05-03").unwrap(), date(1920, 5, 3));
    assert_eq!(
        Timestamp::parse("2001-02-03T17:45:00Z").unwrap().iso_date(),
        "2001-02-03"
    );
    assert!(Timestamp::parse("not a date").is_err());
}

#[test]
fn parse_uuid() {
    let id: Uuid = "2334916b-e46c-4acf-ba6c-c2145f8e4be8".parse().unwrap();
    assert_eq!(id.to_string(), "2334916b-e46c-4acf-ba6c-c2145f8e4be8");
    assert!("abc123".parse::<Uuid>().is_err());
}

#[test]
fn default_config_serializes() {
    let s = Config::default_as_string().unwrap();
    assert!(s.contains("database_location"));
}
