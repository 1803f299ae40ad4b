// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::*;
use crate::error::*;

/// Register values (u16 values) of a read response.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers<'r> {
    pub(crate) data: RawData<'r>,
    pub(crate) quantity: usize,
}

impl<'r> Registers<'r> {
    /// View `quantity` big-endian words at the start of `data`.
    pub fn new(data: &'r [u8], quantity: usize) -> Result<Self, Error> {
        let len = quantity.checked_mul(2).ok_or(Error::BufferSize)?;
        let data = data.get(..len).ok_or(Error::BufferSize)?;
        Ok(Registers { data, quantity })
    }
    /// Quantity of words (u16 values)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.quantity
    }
    ///  Returns `true` if the container has no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.quantity == 0
    }
    /// Get a specific word.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<Word> {
        if idx >= self.quantity {
            return None;
        }
        Some(read_word(self.data, idx * 2))
    }

    /// Copy all words into `target`.
    pub fn copy_to(&self, target: &mut [Word]) -> Result<(), Error> {
        if target.len() < self.quantity {
            return Err(Error::BufferSize);
        }
        for (word, value) in target.iter_mut().zip(self.iter()) {
            *word = value;
        }
        Ok(())
    }

    #[must_use]
    pub const fn payload(&self) -> &[u8] {
        self.data
    }

    #[must_use]
    pub const fn iter(&self) -> RegistersIter<'r> {
        RegistersIter { cnt: 0, data: *self }
    }
}

/// Registers iterator
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistersIter<'r> {
    cnt: usize,
    data: Registers<'r>,
}

impl Iterator for RegistersIter<'_> {
    type Item = Word;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.data.get(self.cnt);
        self.cnt += 1;
        result
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.quantity.saturating_sub(self.cnt);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RegistersIter<'_> {}

impl<'r> IntoIterator for Registers<'r> {
    type Item = Word;
    type IntoIter = RegistersIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
