use anyhow::Result;
use regex::Regex;
use sha3::{Digest, Keccak256};

/// Validates an Ethereum-style (EVM) wallet address.
pub fn validate_ethereum_address(address: &str) -> Result<()> {
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(anyhow::anyhow!("Invalid Ethereum address format"));
    }
    let hex_regex = Regex::new(r"^0x[0-9a-fA-F]{40}$")
        .expect("Hardcoded regex should always compile");
    if !hex_regex.is_match(address) {
        return Err(anyhow::anyhow!("Invalid Ethereum address characters"));
    }
    // EIP-55: if mixed-case, enforce checksum. All-lower or all-upper acceptable for compatibility.
    let body = &address[2..];
    let is_all_lower = body.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
    let is_all_upper = body.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return Ok(());
    }
    if !is_eip55_checksum_valid(address) {
        return Err(anyhow::anyhow!("Invalid EIP-55 checksum for Ethereum address"));
    }
    Ok(())
}

fn is_eip55_checksum_valid(addr: &str) -> bool {
    if addr.len() != 42 || !addr.starts_with("0x") {
        return false;
    }
    let body = &addr[2..];
    let lower = body.to_lowercase();
    let mut keccak = Keccak256::new();
    keccak.update(lower.as_bytes());
    let hash = keccak.finalize();
    for (i, ch) in body.chars().enumerate() {
        let nibble = (hash[i / 2] >> (4 * (1 - (i % 2)))) & 0x0f;
        match ch {
            'a'..='f' => {
                if nibble >= 8 {
                    return false;
                }
            }
            'A'..='F' => {
                if nibble < 8 {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

/// Validates a base58-encoded 32-byte account address (Solana-style).
pub fn validate_base58_address(address: &str) -> Result<()> {
    if address.len() < 32 || address.len() > 44 {
        return Err(anyhow::anyhow!("Invalid base58 address length"));
    }
    match bs58::decode(address).into_vec() {
        Ok(decoded) => {
            if decoded.len() != 32 {
                return Err(anyhow::anyhow!("Invalid base58 address decoded length"));
            }
        }
        Err(_) => return Err(anyhow::anyhow!("Invalid base58 address encoding")),
    }
    Ok(())
}

/// Validates a wallet address against the conventions of the given network.
///
/// This is the format collaborator the analysis orchestrator consults before
/// any scoring runs; unknown networks are rejected rather than guessed at.
pub fn validate_wallet_address(address: &str, network: &str) -> Result<()> {
    if address.is_empty() {
        return Err(anyhow::anyhow!("Wallet address cannot be empty"));
    }
    match network {
        "eth" | "sepolia" | "polygon" | "bsc" => validate_ethereum_address(address),
        "solana" => validate_base58_address(address),
        _ => Err(anyhow::anyhow!("Unsupported network for address validation: {}", network)),
    }
}
