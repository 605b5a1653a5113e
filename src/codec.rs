//! Mixed-radix joint-arm codec.
//!
//! With `P` players each choosing among `L` options, a joint arm `(a_1, …, a_P)` maps to
//!
//! ```text
//!   index = Σ a_i · L^(P-i-1)        (a_1 is the most significant digit)
//! ```
//!
//! in `[0, L^P)`. Encode and decode are mutual inverses over that whole range.

use crate::error::{ConfigError, InvalidInputError};

/// Codec for a fixed player count and radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointArmCodec {
    num_players: usize,
    radix: usize,
    size: usize,
}

impl JointArmCodec {
    /// Fails if there are no players, the radix is zero, or `radix^num_players`
    /// does not fit in `usize`.
    pub fn new(num_players: usize, radix: usize) -> Result<Self, ConfigError> {
        if num_players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if radix == 0 {
            return Err(ConfigError::ZeroRadix);
        }
        let exp = u32::try_from(num_players)
            .map_err(|_| ConfigError::JointSpaceOverflow { radix, num_players })?;
        let size = radix
            .checked_pow(exp)
            .ok_or(ConfigError::JointSpaceOverflow { radix, num_players })?;
        Ok(Self {
            num_players,
            radix,
            size,
        })
    }

    pub fn num_players(&self) -> usize {
        self.num_players
    }

    pub fn radix(&self) -> usize {
        self.radix
    }

    /// Number of joint arms, `radix^num_players`.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn encode(&self, digits: &[usize]) -> Result<usize, InvalidInputError> {
        if digits.len() != self.num_players {
            return Err(InvalidInputError::DigitCount {
                expected: self.num_players,
                actual: digits.len(),
            });
        }
        let mut index = 0usize;
        for (player, &digit) in digits.iter().enumerate() {
            if digit >= self.radix {
                return Err(InvalidInputError::DigitOutOfRange {
                    player,
                    digit,
                    radix: self.radix,
                });
            }
            // Horner form; bounded by `size`, so no overflow.
            index = index * self.radix + digit;
        }
        Ok(index)
    }

    pub fn decode(&self, index: usize) -> Result<Vec<usize>, InvalidInputError> {
        if index >= self.size {
            return Err(InvalidInputError::JointIndexOutOfRange {
                index,
                size: self.size,
            });
        }
        let mut digits = vec![0usize; self.num_players];
        let mut rest = index;
        for slot in digits.iter_mut().rev() {
            *slot = rest % self.radix;
            rest /= self.radix;
        }
        Ok(digits)
    }

    /// One player's digit of a joint index.
    pub fn digit(&self, index: usize, player: usize) -> Result<usize, InvalidInputError> {
        let digits = self.decode(index)?;
        digits
            .get(player)
            .copied()
            .ok_or(InvalidInputError::DigitCount {
                expected: self.num_players,
                actual: player,
            })
    }
}

/// Encode `digits` with the given radix (one digit per player).
pub fn encode_joint(digits: &[usize], radix: usize) -> crate::Result<usize> {
    let codec = JointArmCodec::new(digits.len(), radix)?;
    Ok(codec.encode(digits)?)
}

/// Decode `index` into `num_players` digits of the given radix.
pub fn decode_joint(index: usize, num_players: usize, radix: usize) -> crate::Result<Vec<usize>> {
    let codec = JointArmCodec::new(num_players, radix)?;
    Ok(codec.decode(index)?)
}
