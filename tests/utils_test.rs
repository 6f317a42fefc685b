use stashcli::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_parse_id_list() {
    // Plain list
    assert_eq!(parse_id_list("a,b,c"), vec!["a", "b", "c"]);

    // Whitespace is trimmed
    assert_eq!(parse_id_list(" a , b "), vec!["a", "b"]);

    // Empty segments are dropped
    assert_eq!(parse_id_list("a,,b,"), vec!["a", "b"]);

    // Empty and whitespace-only input yields nothing
    assert!(parse_id_list("").is_empty());
    assert!(parse_id_list("  ,  ").is_empty());

    // Single id
    assert_eq!(parse_id_list("37i9dQZF1DXcBWIGoYBM5M"), vec![
        "37i9dQZF1DXcBWIGoYBM5M"
    ]);
}
