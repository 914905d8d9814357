//! Component id (CID) generation.
//!
//! Generated ids look like `ELE_417`: the first three letters of the first word
//! of the category, upper-cased, and a random suffix in `0..1000`. Nothing
//! guarantees uniqueness; [`CidCollisionPolicy`] decides whether the store
//! tries to avoid collisions with ids already in use.

use rand::Rng;
use serde::Deserialize;

use crate::domain::types::ProductCid;

/// Prefix used when the category yields no letters.
pub const DEFAULT_CID_PREFIX: &str = "PRD";

/// Exclusive upper bound of the random suffix.
pub const CID_SUFFIX_RANGE: u16 = 1000;

const MAX_REGENERATE_ATTEMPTS: usize = 64;

/// What the store does when a generated CID is already taken.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CidCollisionPolicy {
    /// Keep the colliding id.
    #[default]
    Tolerate,
    /// Redraw the suffix a bounded number of times, then keep the last draw.
    Regenerate,
}

/// Upper-cased first three characters of the category's first word.
pub fn cid_prefix(category: &str) -> String {
    category
        .split_whitespace()
        .next()
        .map(|word| word.chars().take(3).collect::<String>().to_uppercase())
        .filter(|prefix| !prefix.is_empty())
        .unwrap_or_else(|| DEFAULT_CID_PREFIX.to_string())
}

/// Draw a fresh CID for `category`.
pub fn generate_cid<R: Rng + ?Sized>(category: &str, rng: &mut R) -> ProductCid {
    ProductCid::generated(&cid_prefix(category), rng.gen_range(0..CID_SUFFIX_RANGE))
}

/// Draw a CID for `category`, applying `policy` against the ids in `taken`.
pub fn assign_cid<'a, R, I>(
    category: &str,
    policy: CidCollisionPolicy,
    rng: &mut R,
    taken: I,
) -> ProductCid
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a ProductCid> + Clone,
{
    let mut cid = generate_cid(category, rng);
    if policy == CidCollisionPolicy::Tolerate {
        return cid;
    }

    for _ in 0..MAX_REGENERATE_ATTEMPTS {
        if !taken.clone().into_iter().any(|existing| *existing == cid) {
            return cid;
        }
        cid = generate_cid(category, rng);
    }

    log::warn!("Could not find a free component id for category '{category}', keeping {cid}");
    cid
}
