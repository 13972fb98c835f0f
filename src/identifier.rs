//! Node identifiers and the sources that produce them.
//!
//! An [`Identifier`] is a short random token: [`LEN`] symbols drawn uniformly from the sixteen
//! uppercase hexadecimal digits. That is only `16^8` possible values so collisions can happen.
//! Trees decide what to do about them through their
//! [`CollisionPolicy`][crate::CollisionPolicy].
//!
//! # Examples
//!
//! ```
//! use indexed_bst::identifier::{self, Identifier};
//!
//! let id = identifier::generate();
//! assert_eq!(id.as_str().len(), identifier::LEN);
//!
//! // Identifiers round trip through their textual form.
//! let parsed: Identifier = id.to_string().parse().unwrap();
//! assert_eq!(parsed, id);
//! ```

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;

/// Number of symbols in every identifier.
pub const LEN: usize = 8;

/// The symbols an identifier is made of, in ascending order.
pub const ALPHABET: &[u8; 16] = b"0123456789ABCDEF";

lazy_static! {
    /// Process-wide entropy shared by every call to [`generate`]. Seeded from the OS the first
    /// time it is used and never torn down.
    static ref ENTROPY: Mutex<StdRng> = Mutex::new(StdRng::from_entropy());
}

/// An opaque, fixed-length node identifier.
///
/// Identifiers compare lexicographically, which is the order removal by
/// [identifier descent][crate::RemovalStrategy::IdentifierDescent] routes on.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier([u8; LEN]);

impl Identifier {
    /// Draws a fresh identifier from the given random number generator.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut symbols = [0; LEN];
        for symbol in &mut symbols {
            *symbol = ALPHABET[rng.gen_range(0..ALPHABET.len())];
        }
        Self(symbols)
    }

    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        // Every byte comes from `ALPHABET` which is ASCII.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl FromStr for Identifier {
    type Err = Error;

    /// Parses an identifier. Lowercase hexadecimal digits are accepted and normalised.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != LEN {
            return Err(Error::MalformedIdentifier(s.to_owned()));
        }

        let mut symbols = [0; LEN];
        for (symbol, byte) in symbols.iter_mut().zip(bytes) {
            let upper = byte.to_ascii_uppercase();
            if !ALPHABET.contains(&upper) {
                return Err(Error::MalformedIdentifier(s.to_owned()));
            }
            *symbol = upper;
        }
        Ok(Self(symbols))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.as_str())
    }
}

/// Generates an identifier from the shared, process-wide entropy source.
pub fn generate() -> Identifier {
    Identifier::random(&mut *ENTROPY.lock())
}

/// Something a tree can ask for new identifiers.
///
/// Implemented by [`RandomIds`] and by any `FnMut() -> Identifier` closure, which is handy for
/// handing a tree a scripted sequence of identifiers.
pub trait IdentifierSource {
    /// Produces the next identifier. Sources aren't required to avoid repeats.
    fn generate(&mut self) -> Identifier;
}

impl<F> IdentifierSource for F
where
    F: FnMut() -> Identifier,
{
    fn generate(&mut self) -> Identifier {
        self()
    }
}

/// The default [`IdentifierSource`]: uniformly random identifiers, either from the process-wide
/// entropy source or from a private seeded generator.
#[derive(Clone, Debug, Default)]
pub struct RandomIds {
    rng: Option<StdRng>,
}

impl RandomIds {
    /// Random identifiers from the process-wide entropy source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Random identifiers from a private generator seeded with `seed`. Two sources built with the
    /// same seed produce the same identifiers.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Some(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdentifierSource for RandomIds {
    fn generate(&mut self) -> Identifier {
        match &mut self.rng {
            Some(rng) => Identifier::random(rng),
            None => generate(),
        }
    }
}
