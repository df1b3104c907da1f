use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PixelError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        PixelError::config("x")
            .to_string()
            .contains("configuration error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PixelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn anyhow_converts_with_question_mark() {
    fn fails() -> PixelResult<()> {
        Err(anyhow::anyhow!("encoder exploded"))?;
        Ok(())
    }
    let err = fails().unwrap_err();
    assert!(matches!(err, PixelError::Other(_)));
    assert_eq!(err.to_string(), "encoder exploded");
}
