use super::*;

#[test]
fn helpers_build_matching_kinds() {
    assert!(matches!(RemediaError::decode("x"), RemediaError::Decode(_)));
    assert!(matches!(RemediaError::input("x"), RemediaError::Input(_)));
    assert!(matches!(
        RemediaError::unsupported("x"),
        RemediaError::UnsupportedFormat(_)
    ));
}

#[test]
fn display_includes_kind_prefix() {
    assert_eq!(
        RemediaError::decode("bad png").to_string(),
        "decode error: bad png"
    );
    assert_eq!(
        RemediaError::input("mono source").to_string(),
        "input error: mono source"
    );
    assert_eq!(
        RemediaError::unsupported("audio/xyz").to_string(),
        "unsupported format: audio/xyz"
    );
}

#[test]
fn anyhow_errors_pass_through_transparently() {
    let e: RemediaError = anyhow::anyhow!("spawn failed").into();
    assert!(matches!(e, RemediaError::Other(_)));
    assert_eq!(e.to_string(), "spawn failed");
}
