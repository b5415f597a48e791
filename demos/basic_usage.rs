//! Basic usage: build -> encode -> decode -> verify
//!
//! Run dengan: cargo run --example basic_usage

use kurir::{CodecError, Msg};

fn main() -> Result<(), CodecError> {
    // Create message
    let original = Msg::new(
        "example_001",
        "kurir_example",
        vec!["user1".to_string(), "user2".to_string()],
        "example",
        "Hello from Rust!",
    );

    println!("Original message body: {}", original.body);

    // Serialize
    let bytes = original.encode()?;
    println!("Serialized size: {} bytes", bytes.len());

    // Deserialize
    let decoded = Msg::decode(&bytes)?;

    // Verify
    assert_eq!(decoded.body, original.body);
    assert_eq!(decoded.from_id, original.from_id);
    assert_eq!(decoded.id, original.id);
    assert_eq!(decoded.to_ids, original.to_ids);
    assert_eq!(decoded.msg_type, original.msg_type);

    println!("✅ Round-trip test passed!");
    Ok(())
}
