use super::*;

#[test]
fn parses_long_and_short_hex() {
    assert_eq!(parse_color("#1a2B3c"), Some(Rgb(0x1a, 0x2b, 0x3c)));
    assert_eq!(parse_color("#fff"), Some(Rgb::WHITE));
    assert_eq!(parse_color("  #000000 "), Some(Rgb::BLACK));
}

#[test]
fn parses_names_case_insensitively() {
    assert_eq!(parse_color("White"), Some(Rgb::WHITE));
    assert_eq!(parse_color("grey"), parse_color("gray"));
    assert_eq!(parse_color("chocolate"), Some(Rgb(0xd2, 0x69, 0x1e)));
    assert_eq!(parse_color("LightSkyBlue"), Some(Rgb(0x87, 0xce, 0xfa)));
    assert_eq!(parse_color("light sky blue"), parse_color("lightskyblue"));
}

#[test]
fn name_table_is_sorted_and_unique() {
    assert!(NAMED.windows(2).all(|w| w[0].0 < w[1].0));
    assert_eq!(NAMED.len(), 148);
    assert_eq!(parse_color("aliceblue"), Some(Rgb(0xf0, 0xf8, 0xff)));
    assert_eq!(parse_color("yellowgreen"), Some(Rgb(0x9a, 0xcd, 0x32)));
}

#[test]
fn rejects_garbage() {
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("#gghhii"), None);
    assert_eq!(parse_color("#ééé"), None);
    assert_eq!(parse_color("chartreuse-ish"), None);
    assert_eq!(parse_color("chocolate1"), None);
}

#[test]
fn hex_formatting_is_lowercase() {
    assert_eq!(Rgb(0xAB, 0x01, 0xff).to_hex(), "#ab01ff");
}

#[test]
fn deserializes_from_json_string() {
    let c: Rgb = serde_json::from_str("\"#102030\"").unwrap();
    assert_eq!(c, Rgb(0x10, 0x20, 0x30));
    assert!(serde_json::from_str::<Rgb>("\"nope\"").is_err());
}
