//! Block digest utilities

/// Digest a block with blake3. Pure and total: same bytes, same 32-byte
/// digest, no failure mode.
pub fn hash_block(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// Hex form of a digest, for reports.
pub fn hash_hex(digest: &[u8; 32]) -> String {
    blake3::Hash::from_bytes(*digest).to_hex().to_string()
}
