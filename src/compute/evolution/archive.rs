//! Progress artifacts written whenever the best score improves.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::pnm::{FrameRecorder, write_pgm};
use crate::schema::{Improvement, OutputConfig};

/// Scaled grayscale image of the current best render.
pub const PROGRESS_FILE: &str = "progress.pgm";
/// Every improvement appended as a binary PPM frame.
pub const VIDEO_FILE: &str = "video.ppm";
/// Text serialization of the current best table.
pub const RULESET_FILE: &str = "best.txt";

/// Writes progress artifacts into an output directory.
pub struct ProgressArchive {
    dir: PathBuf,
    scale: usize,
    ncolors: usize,
    iterations: u32,
    video: FrameRecorder,
}

impl ProgressArchive {
    /// Create the output directory and start a fresh video file.
    pub fn create(config: &OutputConfig, ncolors: usize, iterations: u32) -> io::Result<Self> {
        fs::create_dir_all(&config.dir)?;
        let video = FrameRecorder::create(config.dir.join(VIDEO_FILE), ncolors, config.scale)?;
        Ok(Self {
            dir: config.dir.clone(),
            scale: config.scale,
            ncolors,
            iterations,
            video,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of video frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.video.frames_written()
    }

    /// Write all artifacts for a new best individual.
    ///
    /// Every artifact is attempted; the first failure is returned.
    pub fn record(&mut self, improvement: &Improvement) -> io::Result<()> {
        let image = &improvement.image;
        let (ncolors, scale) = (self.ncolors, self.scale);

        let progress = write_replacing(&self.dir, PROGRESS_FILE, |w| {
            write_pgm(image, ncolors, scale, w)
        });
        let frame = self.video.record_frame(image);
        let ruleset = write_replacing(&self.dir, RULESET_FILE, |w| {
            improvement.table.write_to(self.iterations, w)
        });

        [progress, frame, ruleset].into_iter().collect()
    }
}

/// Write to `_<name>` then rename over `<name>`, so readers never see a
/// partial file.
fn write_replacing<F>(dir: &Path, name: &str, write: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let tmp = dir.join(format!("_{name}"));
    let mut writer = BufWriter::new(File::create(&tmp)?);
    write(&mut writer)?;
    writer.flush()?;
    drop(writer);
    fs::rename(&tmp, dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::render;
    use crate::pnm::read_pgm;
    use crate::schema::{RuleTable, Ruleset};
    use tempfile::tempdir;

    fn improvement() -> Improvement {
        let table = RuleTable::from_rows(vec![
            [0, 1, 0, 1, 0, 1, 0, 1, 0],
            [1, 0, 1, 0, 1, 0, 1, 0, 1],
        ])
        .unwrap();
        let image = render(&table, 9);
        Improvement { table, image }
    }

    #[test]
    fn test_record_writes_all_artifacts() {
        let dir = tempdir().unwrap();
        let config = OutputConfig {
            dir: dir.path().join("out"),
            scale: 2,
        };
        let mut archive = ProgressArchive::create(&config, 2, 2).unwrap();
        let improvement = improvement();

        archive.record(&improvement).unwrap();
        archive.record(&improvement).unwrap();
        assert_eq!(archive.frames_written(), 2);

        let progress = fs::read(config.dir.join(PROGRESS_FILE)).unwrap();
        let parsed = read_pgm(progress.as_slice(), 18).unwrap();
        assert_eq!(parsed.ncolors(), 2);
        assert_eq!(parsed.image.get(2, 0), improvement.image.get(1, 0));

        let text = fs::read_to_string(config.dir.join(RULESET_FILE)).unwrap();
        let ruleset = Ruleset::parse(&text).unwrap();
        assert_eq!(ruleset.table, improvement.table);
        assert_eq!(render(&ruleset.table, ruleset.resolution().unwrap()), improvement.image);

        let video = fs::metadata(config.dir.join(VIDEO_FILE)).unwrap();
        let frame_len = "P6\n18 18\n255\n".len() + 18 * 18 * 3;
        assert_eq!(video.len(), 2 * frame_len as u64);

        assert!(!config.dir.join("_progress.pgm").exists());
    }

    #[test]
    fn test_record_reports_failure() {
        let dir = tempdir().unwrap();
        let config = OutputConfig {
            dir: dir.path().to_path_buf(),
            scale: 1,
        };
        let mut archive = ProgressArchive::create(&config, 2, 2).unwrap();
        // A directory where the ruleset should go makes the rename fail.
        fs::create_dir(dir.path().join(RULESET_FILE)).unwrap();
        fs::write(dir.path().join(RULESET_FILE).join("keep"), b"x").unwrap();

        assert!(archive.record(&improvement()).is_err());
        // The other artifacts were still written.
        assert!(dir.path().join(PROGRESS_FILE).exists());
        assert_eq!(archive.frames_written(), 1);
    }
}
