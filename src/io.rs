use std::fs::File;
use std::io::{Read as _, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bytesize::ByteSize;
use colored::Colorize;

use crate::error::{Error, Result};

/// Anything that can hand back real-valued IF samples by absolute sample
/// offset, per §6.
pub trait SampleSource {
    fn read(&mut self, offset_samples: usize, num_samples: usize) -> Result<Vec<f64>>;
}

/// Reads the front-end capture format of §6: one signed 16-bit little-endian
/// integer per real sample.
pub struct FileSampleSource {
    path: PathBuf,
    sample_rate_hz: f64,
}

impl FileSampleSource {
    pub fn open(path: impl AsRef<Path>, sample_rate_hz: f64) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata =
            std::fs::metadata(&path).map_err(|e| Error::SampleIo(format!("{}: {e}", path.display())))?;

        let duration_sec = metadata.len() as f64 / 2.0 / sample_rate_hz;
        log::info!(
            "{}: {} -- duration: {:.1} sec",
            path.display().to_string().green(),
            ByteSize::b(metadata.len()).to_string_as(false).bold(),
            duration_sec,
        );

        Ok(Self { path, sample_rate_hz })
    }

    /// Rounds a requested duration down to a whole multiple of 16 samples,
    /// per §6.
    pub fn samples_for_duration(&self, duration_sec: f64) -> usize {
        let n = (self.sample_rate_hz * duration_sec) as usize;
        (n / 16) * 16
    }
}

impl SampleSource for FileSampleSource {
    fn read(&mut self, offset_samples: usize, num_samples: usize) -> Result<Vec<f64>> {
        let mut file =
            File::open(&self.path).map_err(|e| Error::SampleIo(format!("{}: {e}", self.path.display())))?;
        file.seek(SeekFrom::Start((offset_samples * 2) as u64))
            .map_err(|e| Error::SampleIo(e.to_string()))?;

        let mut buf = vec![0u8; num_samples * 2];
        let mut n_read = 0usize;
        loop {
            match file.read(&mut buf[n_read..]) {
                Ok(0) => break,
                Ok(n) => n_read += n,
                Err(e) => return Err(Error::SampleIo(e.to_string())),
            }
            if n_read == buf.len() {
                break;
            }
        }

        let n_samples_read = n_read / 2;
        if n_samples_read < num_samples {
            return Err(Error::InsufficientSamples {
                requested: num_samples,
                available: n_samples_read,
            });
        }

        Ok(buf
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]) as f64)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_i16_le_file(path: &Path, samples: &[i16]) {
        let mut f = File::create(path).unwrap();
        for &s in samples {
            f.write_all(&s.to_le_bytes()).unwrap();
        }
    }

    #[test]
    fn reads_back_the_exact_samples_written() {
        let _ = env_logger::builder().is_test(true).try_init();

        let dir = std::env::temp_dir();
        let path = dir.join(format!("gnss-baseband-test-{}.bin", std::process::id()));
        let samples: Vec<i16> = vec![0, 1, -1, 1000, -32768, 32767];
        write_i16_le_file(&path, &samples);

        let mut src = FileSampleSource::open(&path, 5_714_285.7).unwrap();
        let got = src.read(0, samples.len()).unwrap();
        let expected: Vec<f64> = samples.iter().map(|&s| s as f64).collect();
        assert_eq!(got, expected);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fails_when_the_file_is_shorter_than_requested() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("gnss-baseband-test-short-{}.bin", std::process::id()));
        write_i16_le_file(&path, &[1, 2, 3]);

        let mut src = FileSampleSource::open(&path, 1_000_000.0).unwrap();
        let err = src.read(0, 100).unwrap_err();
        assert!(matches!(err, Error::InsufficientSamples { available: 3, .. }));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rounds_requested_durations_down_to_a_multiple_of_sixteen_samples() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("gnss-baseband-test-dur-{}.bin", std::process::id()));
        write_i16_le_file(&path, &[0; 100]);

        let src = FileSampleSource::open(&path, 1000.0).unwrap();
        assert_eq!(src.samples_for_duration(0.0313), 16);

        std::fs::remove_file(&path).unwrap();
    }
}
