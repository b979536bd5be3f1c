//! Fixed five-band spectra
//!
//! QAA v6 works on exactly five bands. A [`Spectrum`] holds one value per [`Band`], stored
//! positionally in the order 410, 443, 490, 555, 670 nm. Bands are addressed by the [`Band`]
//! enum, never looked up by wavelength value.

use serde::Serialize;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Number of bands used by QAA v6
pub const BAND_COUNT: usize = 5;

/// The five QAA bands, named after the colour of their nominal centre
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// 410 nm
    Violet,
    /// 443 nm
    Cyan,
    /// 490 nm
    Blue,
    /// 555 nm
    Green,
    /// 670 nm
    Red,
}

impl Band {
    /// All bands in storage order
    pub const ALL: [Band; BAND_COUNT] = [
        Band::Violet,
        Band::Cyan,
        Band::Blue,
        Band::Green,
        Band::Red,
    ];

    pub const fn index(self) -> usize {
        match self {
            Band::Violet => 0,
            Band::Cyan => 1,
            Band::Blue => 2,
            Band::Green => 3,
            Band::Red => 4,
        }
    }

    /// Nominal wavelength (nm)
    pub const fn wavelength(self) -> u32 {
        match self {
            Band::Violet => 410,
            Band::Cyan => 443,
            Band::Blue => 490,
            Band::Green => 555,
            Band::Red => 670,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}nm", self.wavelength())
    }
}

/// One value per QAA band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spectrum<T>([T; BAND_COUNT]);

impl<T> Spectrum<T> {
    pub const fn new(values: [T; BAND_COUNT]) -> Self {
        Self(values)
    }

    /// Builds a spectrum by evaluating `f` for every band in storage order
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Band) -> T,
    {
        Self(std::array::from_fn(|i| f(Band::ALL[i])))
    }

    pub fn map<U, F>(self, f: F) -> Spectrum<U>
    where
        F: FnMut(T) -> U,
    {
        Spectrum(self.0.map(f))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Iterates `(band, value)` pairs in storage order
    pub fn bands(&self) -> impl Iterator<Item = (Band, &T)> {
        Band::ALL.into_iter().zip(self.0.iter())
    }

    pub fn as_array(&self) -> &[T; BAND_COUNT] {
        &self.0
    }

    pub fn into_array(self) -> [T; BAND_COUNT] {
        self.0
    }
}

impl<T: Default> Default for Spectrum<T> {
    fn default() -> Self {
        Self(std::array::from_fn(|_| T::default()))
    }
}

impl<T> From<[T; BAND_COUNT]> for Spectrum<T> {
    fn from(values: [T; BAND_COUNT]) -> Self {
        Self(values)
    }
}

impl<T> Index<Band> for Spectrum<T> {
    type Output = T;

    fn index(&self, band: Band) -> &T {
        &self.0[band.index()]
    }
}

impl<T> IndexMut<Band> for Spectrum<T> {
    fn index_mut(&mut self, band: Band) -> &mut T {
        &mut self.0[band.index()]
    }
}

impl<'a, T> IntoIterator for &'a Spectrum<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
