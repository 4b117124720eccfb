//! Shared fixtures: a fixed DSA key and an SSK inserter built only from the
//! crate's public API plus a test-side signer.

#![allow(dead_code)]

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use ssk_crypto::{
    encrypt_docname, location_from_ehdocname, mask_digest, DsaGroup, Key, PcfbMode, PubKey,
    Rijndael256, SskFound, SskHeader, CIPHER_AES_PCFB_256_SHA256, ENCRYPTED_HEADERS_SIZE,
    HASH_SHA256, SSK_DATA_SIZE,
};

const P: &str = "84a843e173416e21e8e53b7ef03bf3a5f560ddea6089fff5adcbb39c938842fc01b1ce565dd4186f54bf8fc598cdaf37b0425a8b32fd2399624c2c89da5990b8629ec50784b59987046eaa3776e417af0d4b29af40fafa8026e7d9b968384767c2dba5784bbb2541fbfe39602df122391b0ada08933147d8df94760c0519ac53";
const Q: &str = "8f1973df0f870e6a26cfb3f3a8dba797dc7d4bc2c5bd42feb6fbb997aaa581bb";
const G: &str = "3ab0bba2cedebc3b964976ce7b115ddcbf2991f803863109b1b60eacd0d61187b9d66114adcdf1d21191f3ca0890b5d0ab090d0a32ec2c3a5935d4fa7c9db37c65d7fcd32e306afb5fafc0b33dfc8afb27bd498e3d1dd67e6495e81fd6766c9e1e2b9d4a73a47d50b614b2cd34c17cccf778498a8169fd9e76d2e91298811463";
const X: &str = "54233339ccb4d3ffc004c3aaa48bef5d969fcbaef6723091b3e1f0f3f172acc6";
const Y: &str = "2e73d0fa22abcd90679a3e10de090593a9ab5b1f16a1f46979357459286f27f72453277fb75bc8cf153dcf7434eed5fb76853a6c14175fbaee0b9849d2c07af30da4c327a14059ebf46a3b291b5b60ddee9b1000c37b8fd8b06d0a955c7b8cb23ff0fd3f02bc51a28dd0c8c60d6c4f75db9412e584ec754429a21ebace9465e4";

fn big(hex_str: &str) -> BigUint {
    BigUint::parse_bytes(hex_str.as_bytes(), 16).expect("valid hex constant")
}

pub fn public_key() -> PubKey {
    let group = DsaGroup::new(big(P), big(Q), big(G)).expect("test group");
    PubKey::new(group, big(Y)).expect("test public key")
}

fn field(n: &BigUint) -> [u8; 32] {
    let bytes = n.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// DSA-sign `SHA256(prefix ++ SHA256(data))` with the 255-bit digest mask.
pub fn sign(prefix: &[u8], data: &[u8]) -> ([u8; 32], [u8; 32]) {
    let (p, q, g, x) = (big(P), big(Q), big(G), big(X));

    let mut hasher = Sha256::new();
    hasher.update(prefix);
    hasher.update(Sha256::digest(data));
    let m = BigUint::from_bytes_be(&mask_digest(&hasher.finalize()));

    let nonce_seed = Sha256::digest([x.to_bytes_be(), m.to_bytes_be()].concat());
    let k = BigUint::from_bytes_be(&nonce_seed) % (&q - 1u32) + 1u32;
    let r = g.modpow(&k, &p) % &q;
    let s = (k.modpow(&(&q - 2u32), &q) * (&m + &x * &r)) % &q;
    (field(&r), field(&s))
}

pub struct Inserted {
    pub crypto_key: Key,
    pub docname: String,
    pub plaintext: Vec<u8>,
    pub location: Key,
    pub header: SskHeader,
    pub data: Vec<u8>,
}

impl Inserted {
    pub fn found(&self) -> SskFound {
        SskFound::new(self.location, self.header.clone(), &self.data, public_key())
            .expect("genuine block must verify")
    }
}

/// Encrypt, sign and address `plaintext` the way an SSK inserter would.
pub fn insert(crypto_key: Key, docname: &str, plaintext: &[u8], payload_key: [u8; 32]) -> Inserted {
    insert_with(crypto_key, docname, plaintext, payload_key, plaintext.len() as u16, HASH_SHA256)
}

pub fn insert_with(
    crypto_key: Key,
    docname: &str,
    plaintext: &[u8],
    payload_key: [u8; 32],
    length_field: u16,
    hash_algorithm: u16,
) -> Inserted {
    let eh_docname = encrypt_docname(&crypto_key, docname);

    let mut blob = [0u8; ENCRYPTED_HEADERS_SIZE];
    blob[..32].copy_from_slice(&payload_key);
    blob[32..34].copy_from_slice(&length_field.to_be_bytes());
    blob[34..].copy_from_slice(&(-1i16).to_be_bytes());
    PcfbMode::new(Rijndael256::new(crypto_key.as_bytes()), eh_docname.as_bytes())
        .unwrap()
        .encipher(&mut blob);

    let mut data = plaintext.to_vec();
    data.resize(SSK_DATA_SIZE, 0);
    PcfbMode::new(Rijndael256::new(&payload_key), &payload_key)
        .unwrap()
        .encipher(&mut data);

    let unsigned = SskHeader::assemble(
        hash_algorithm,
        CIPHER_AES_PCFB_256_SHA256,
        &eh_docname,
        &blob,
        &[0; 32],
        &[0; 32],
    );
    let (r, s) = sign(unsigned.signed_portion(), &data);
    let header = SskHeader::assemble(
        hash_algorithm,
        CIPHER_AES_PCFB_256_SHA256,
        &eh_docname,
        &blob,
        &r,
        &s,
    );

    Inserted {
        crypto_key,
        docname: docname.to_string(),
        plaintext: plaintext.to_vec(),
        location: location_from_ehdocname(&public_key().hash(), &eh_docname),
        header,
        data,
    }
}
