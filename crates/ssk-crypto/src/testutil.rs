//! Fixed DSA test group, a deterministic test signer, and a builder for
//! genuine SSK blocks.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};
use ssk_core::types::{
    CIPHER_AES_PCFB_256_SHA256, ENCRYPTED_HEADERS_SIZE, HASH_SHA256, SSK_DATA_SIZE,
};
use ssk_core::Key;

use crate::dsa::{mask_digest, DsaSignature};
use crate::found::SskFound;
use crate::header::SskHeader;
use crate::location::{encrypt_docname, location_from_ehdocname};
use crate::pcfb::PcfbMode;
use crate::pubkey::{DsaGroup, PubKey};
use crate::rijndael::Rijndael256;

// 1024-bit p, 256-bit q
const P: &str = "84a843e173416e21e8e53b7ef03bf3a5f560ddea6089fff5adcbb39c938842fc01b1ce565dd4186f54bf8fc598cdaf37b0425a8b32fd2399624c2c89da5990b8629ec50784b59987046eaa3776e417af0d4b29af40fafa8026e7d9b968384767c2dba5784bbb2541fbfe39602df122391b0ada08933147d8df94760c0519ac53";
const Q: &str = "8f1973df0f870e6a26cfb3f3a8dba797dc7d4bc2c5bd42feb6fbb997aaa581bb";
const G: &str = "3ab0bba2cedebc3b964976ce7b115ddcbf2991f803863109b1b60eacd0d61187b9d66114adcdf1d21191f3ca0890b5d0ab090d0a32ec2c3a5935d4fa7c9db37c65d7fcd32e306afb5fafc0b33dfc8afb27bd498e3d1dd67e6495e81fd6766c9e1e2b9d4a73a47d50b614b2cd34c17cccf778498a8169fd9e76d2e91298811463";
const X: &str = "54233339ccb4d3ffc004c3aaa48bef5d969fcbaef6723091b3e1f0f3f172acc6";
const Y: &str = "2e73d0fa22abcd90679a3e10de090593a9ab5b1f16a1f46979357459286f27f72453277fb75bc8cf153dcf7434eed5fb76853a6c14175fbaee0b9849d2c07af30da4c327a14059ebf46a3b291b5b60ddee9b1000c37b8fd8b06d0a955c7b8cb23ff0fd3f02bc51a28dd0c8c60d6c4f75db9412e584ec754429a21ebace9465e4";

fn big(hex_str: &str) -> BigUint {
    BigUint::parse_bytes(hex_str.as_bytes(), 16).unwrap()
}

pub fn group() -> DsaGroup {
    DsaGroup::new(big(P), big(Q), big(G)).unwrap()
}

pub fn public_key() -> PubKey {
    PubKey::new(group(), big(Y)).unwrap()
}

/// Sign the (already masked) message integer `m` with the test private key.
pub fn sign(m: &BigUint) -> DsaSignature {
    let (p, q, g, x) = (big(P), big(Q), big(G), big(X));

    // Deterministic nonce in [1, q - 1]
    let mut hasher = Sha256::new();
    hasher.update(x.to_bytes_be());
    hasher.update(m.to_bytes_be());
    let k = BigUint::from_bytes_be(&hasher.finalize()) % (&q - 1u32) + 1u32;

    let r = g.modpow(&k, &p) % &q;
    let k_inv = k.modpow(&(&q - 2u32), &q);
    let s = (k_inv * (m + &x * &r)) % &q;
    DsaSignature::new(r, s)
}

fn to_field(n: &BigUint) -> [u8; 32] {
    let bytes = n.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Sign a header prefix and payload the way SSK inserters do.
pub fn sign_block(signed_portion: &[u8], data: &[u8]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha256::new();
    hasher.update(signed_portion);
    hasher.update(Sha256::digest(data));
    let m = BigUint::from_bytes_be(&mask_digest(&hasher.finalize()));
    let sig = sign(&m);
    (to_field(sig.r()), to_field(sig.s()))
}

#[derive(Debug, Clone)]
pub struct BlockParams {
    pub crypto_key: Key,
    pub docname: String,
    pub plaintext: Vec<u8>,
    pub payload_key: [u8; 32],
    pub is_metadata: bool,
    pub compression_algorithm: i16,
    /// Overrides the length written into the encrypted blob.
    pub length_field: Option<u16>,
    pub hash_algorithm: u16,
}

impl Default for BlockParams {
    fn default() -> Self {
        Self {
            crypto_key: Key::from_bytes([0x42; 32]),
            docname: "site/index.html".into(),
            plaintext: b"SSK test payload".to_vec(),
            payload_key: [0x17; 32],
            is_metadata: false,
            compression_algorithm: -1,
            length_field: None,
            hash_algorithm: HASH_SHA256,
        }
    }
}

pub struct BuiltBlock {
    pub location: Key,
    pub header: SskHeader,
    pub data: Vec<u8>,
}

/// Encrypt and sign a block from `params` with the test key.
pub fn build_block(params: &BlockParams) -> BuiltBlock {
    assert!(params.plaintext.len() <= SSK_DATA_SIZE);
    let eh_docname = encrypt_docname(&params.crypto_key, &params.docname);

    let mut length = params
        .length_field
        .unwrap_or(params.plaintext.len() as u16);
    if params.is_metadata {
        length |= 0x8000;
    }
    let mut blob = [0u8; ENCRYPTED_HEADERS_SIZE];
    blob[..32].copy_from_slice(&params.payload_key);
    blob[32..34].copy_from_slice(&length.to_be_bytes());
    blob[34..].copy_from_slice(&params.compression_algorithm.to_be_bytes());
    PcfbMode::new(
        Rijndael256::new(params.crypto_key.as_bytes()),
        eh_docname.as_bytes(),
    )
    .unwrap()
    .encipher(&mut blob);

    let mut data = params.plaintext.clone();
    data.resize(SSK_DATA_SIZE, 0);
    PcfbMode::new(Rijndael256::new(&params.payload_key), &params.payload_key)
        .unwrap()
        .encipher(&mut data);

    let unsigned = SskHeader::assemble(
        params.hash_algorithm,
        CIPHER_AES_PCFB_256_SHA256,
        &eh_docname,
        &blob,
        &[0u8; 32],
        &[0u8; 32],
    );
    let (r, s) = sign_block(unsigned.signed_portion(), &data);
    let header = SskHeader::assemble(
        params.hash_algorithm,
        CIPHER_AES_PCFB_256_SHA256,
        &eh_docname,
        &blob,
        &r,
        &s,
    );

    BuiltBlock {
        location: location_from_ehdocname(&public_key().hash(), &eh_docname),
        header,
        data,
    }
}

pub fn build_found(params: &BlockParams) -> SskFound {
    let block = build_block(params);
    SskFound::new(block.location, block.header, &block.data, public_key()).unwrap()
}
