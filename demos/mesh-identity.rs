//! Two mesh peers establishing trust with nothing but their Ed25519 identities.
//!
//! Each peer generates an identity keypair and publishes its public key. Peer A signs an
//! announcement, which B verifies. Both then derive Curve25519 keypairs from their identities,
//! and B derives A's key-agreement public key from the identity key it already has, so no extra
//! key needs to be exchanged before the two agree on a shared point.
//!
//! This only demonstrates the library: a real peer would hash the shared point into a session
//! key, and would learn the other peer's public key over the network rather than from memory.
//!
//! ## Example usage:
//!
//! ```bash
//! cargo run --example mesh-identity "hello from node A"
//! ```

use anyhow::{bail, Context};
use meshkey::{curve25519, KeyPair, KeyType, PublicKey};

struct Peer {
    name: &'static str,
    identity: KeyPair,
}

impl Peer {
    fn new(name: &'static str) -> anyhow::Result<Self> {
        let identity = meshkey::generate_key_pair().context("generating identity")?;
        Ok(Self { name, identity })
    }

    /// The announcement a peer would broadcast: its identity public key, tagged with its type.
    fn announcement(&self) -> anyhow::Result<String> {
        let public_key = PublicKey::from_bytes(KeyType::Ed25519, self.identity.public_key())?;
        Ok(serde_json::to_string(&public_key)?)
    }

    /// Compute the shared point with a peer, knowing only its identity public key.
    fn agree(&self, peer_identity: &PublicKey) -> anyhow::Result<curve25519::SharedSecret> {
        let ours = match meshkey::convert_key_pair(&self.identity, KeyType::Curve25519)? {
            KeyPair::Curve25519(keypair) => keypair,
            KeyPair::Ed25519(_) => bail!("conversion returned an Ed25519 keypair"),
        };

        let theirs = match meshkey::convert_public_key(
            peer_identity.as_bytes(),
            peer_identity.key_type(),
            KeyType::Curve25519,
        )? {
            PublicKey::Curve25519(key) => key,
            PublicKey::Ed25519(_) => bail!("conversion returned an Ed25519 public key"),
        };

        Ok(curve25519::scalar_mult(ours.private_key(), &theirs)?)
    }
}

fn main() -> anyhow::Result<()> {
    let message = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "hello from node A".to_string());

    let a = Peer::new("A")?;
    let b = Peer::new("B")?;

    // Exchange identity keys
    let a_public: PublicKey = serde_json::from_str(&a.announcement()?)?;
    let b_public: PublicKey = serde_json::from_str(&b.announcement()?)?;

    let signed = meshkey::sign(message.as_bytes(), a.identity.private_key())?;
    println!("{} signed {} bytes -> {} bytes", a.name, message.len(), signed.len());

    let verified = meshkey::verify(&signed, a_public.as_bytes())?;
    println!("{} verified: {:?}", b.name, String::from_utf8_lossy(&verified));

    let mut forged = signed.clone();
    let last = forged.len() - 1;
    forged[last] ^= 0x01;
    match meshkey::verify(&forged, a_public.as_bytes()) {
        Err(e) if e.is_verification_failure() => println!("{} rejected a forgery", b.name),
        other => bail!("forged payload was not rejected: {:?}", other),
    }

    let a_view = a.agree(&b_public)?;
    let b_view = b.agree(&a_public)?;
    if a_view != b_view {
        bail!("peers disagree on the shared point");
    }
    println!("{} and {} agree on a shared point", a.name, b.name);

    // There is no way back from Curve25519 to Ed25519
    let err = meshkey::convert_public_key(
        &[0u8; 32],
        KeyType::Curve25519,
        KeyType::Ed25519,
    )
    .unwrap_err();
    println!("reverse conversion: {}", err);

    Ok(())
}
