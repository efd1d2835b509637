//! Raw binary (de)serialization and on-disk graph file formats.
//!
//! Every named array in this crate (tails, heads, weights, orders, ...) is
//! stored as one file of raw little-endian values — the same convention the
//! teacher uses throughout `rust_road_router::io`. `Load`/`Store` cover a
//! single array; `Deconstruct`/`ReconstructPrepared` cover a directory of
//! named arrays making up one compound structure (used for the persisted
//! elimination order and, in principle, a cached CCH skeleton).

use std::fs::File;
use std::io::{self, Read, Write};
use std::mem::size_of;
use std::path::{Path, PathBuf};

pub mod binary_graph;
pub mod dimacs;
pub mod metis;
pub mod order;
pub mod pace;
pub mod routingkit;

/// A type that can be viewed as a flat byte slice for raw storage.
pub trait DataBytes {
    fn data_bytes(&self) -> &[u8];
}

pub trait DataBytesMut {
    fn data_bytes_mut(&mut self) -> &mut [u8];
}

impl<T: Copy> DataBytes for [T] {
    fn data_bytes(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.as_ptr() as *const u8, std::mem::size_of_val(self)) }
    }
}

impl<T: Copy> DataBytesMut for [T] {
    fn data_bytes_mut(&mut self) -> &mut [u8] {
        unsafe { std::slice::from_raw_parts_mut(self.as_mut_ptr() as *mut u8, std::mem::size_of_val(self)) }
    }
}

impl<T: Copy> DataBytesMut for Vec<T> {
    fn data_bytes_mut(&mut self) -> &mut [u8] {
        self[..].data_bytes_mut()
    }
}

/// Load a value of `Self` from a raw byte buffer of known length.
pub trait Load: Sized {
    fn new_with_bytes(num_bytes: usize) -> Self;

    fn load_from<P: AsRef<Path>>(path: P) -> io::Result<Self>
    where
        Self: DataBytesMut,
    {
        let mut file = File::open(path)?;
        let len = file.metadata()?.len() as usize;
        let mut result = Self::new_with_bytes(len);
        file.read_exact(result.data_bytes_mut())?;
        Ok(result)
    }
}

impl<T: Copy + Default> Load for Vec<T> {
    fn new_with_bytes(num_bytes: usize) -> Self {
        assert_eq!(num_bytes % size_of::<T>(), 0, "file size is not a multiple of the element size");
        vec![T::default(); num_bytes / size_of::<T>()]
    }
}

/// Write a value of `Self` to disk as a raw byte dump.
pub trait Store {
    fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()>;
}

impl<T: Copy> Store for [T] {
    fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.data_bytes())
    }
}

impl<T: Copy> Store for Vec<T> {
    fn write_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        self[..].write_to(path)
    }
}

/// A directory of named raw-array files, used to assemble a compound
/// structure back from disk. Mirrors `rust_road_router`'s
/// `Loader`/`Reconstruct` pair used e.g. to rebuild a `CCH` from
/// `cch_first_out`/`cch_head`.
pub struct Loader {
    dir: PathBuf,
}

impl Loader {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Loader { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn load<T: Load + DataBytesMut>(&self, name: &str) -> io::Result<T> {
        T::load_from(self.dir.join(name))
    }
}

/// Split a compound structure into its named on-disk components.
pub trait Deconstruct {
    fn store_each(&self, store: &dyn Fn(&str, &dyn Store) -> io::Result<()>) -> io::Result<()>;

    fn deconstruct_to<P: AsRef<Path>>(&self, dir: P) -> io::Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        self.store_each(&|name, store| store.write_to(dir.join(name)))
    }
}

/// Reassemble `Output` from a [`Loader`] pointing at a previously
/// [`Deconstruct`]ed directory.
pub trait ReconstructPrepared<Output> {
    fn reconstruct_with(self, loader: Loader) -> io::Result<Output>;

    fn reconstruct_from<P: AsRef<Path>>(self, dir: P) -> io::Result<Output>
    where
        Self: Sized,
    {
        self.reconstruct_with(Loader::new(dir.as_ref().to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    #[test]
    fn raw_u32_round_trip() {
        let data: Vec<u32> = vec![1, 2, 3, 4, 1_000_000];
        let path = temp_dir().join("flow_cutter_order_test_u32_roundtrip.bin");
        data.write_to(&path).unwrap();
        let loaded: Vec<u32> = Vec::load_from(&path).unwrap();
        assert_eq!(data, loaded);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn raw_f32_round_trip() {
        let data: Vec<f32> = vec![1.5, -2.25, 0.0, 180.123];
        let path = temp_dir().join("flow_cutter_order_test_f32_roundtrip.bin");
        data.write_to(&path).unwrap();
        let loaded: Vec<f32> = Vec::load_from(&path).unwrap();
        assert_eq!(data, loaded);
        std::fs::remove_file(&path).unwrap();
    }
}
