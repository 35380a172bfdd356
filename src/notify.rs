use crate::error::{DeliveryError, NotifyError};
use crate::santa::{compose_message, Assignments, Message};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub trait Notifier {
    fn notify(&mut self, gifter: &str, message: &Message) -> Result<(), NotifyError>;
}

/// Writes one `<gifter>.txt` per participant into a directory.
///
/// Refuses to write a file it has already written, so two names that map to
/// the same file name cannot overwrite each other's assignment.
#[derive(Debug, Clone)]
pub struct FileNotifier {
    dir: PathBuf,
    written: HashSet<PathBuf>,
}

impl FileNotifier {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        FileNotifier {
            dir: dir.as_ref().to_path_buf(),
            written: HashSet::new(),
        }
    }

    pub fn path_for(&self, gifter: &str) -> PathBuf {
        let file_name: String = gifter
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{file_name}.txt"))
    }
}

impl Notifier for FileNotifier {
    fn notify(&mut self, gifter: &str, message: &Message) -> Result<(), NotifyError> {
        let path = self.path_for(gifter);
        if self.written.contains(&path) {
            return Err(NotifyError::PathCollision {
                gifter: gifter.to_string(),
                path,
            });
        }
        fs::create_dir_all(&self.dir).map_err(|source| NotifyError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(&path, &message.body).map_err(|source| NotifyError::Io {
            path: path.clone(),
            source,
        })?;
        info!(gifter, path = %path.display(), "assignment written");
        self.written.insert(path);
        Ok(())
    }
}

/// Prints every message to a writer; meant for dry runs, not for secrecy.
pub struct ConsoleNotifier<W: Write> {
    out: W,
}

impl ConsoleNotifier<io::Stdout> {
    pub fn stdout() -> Self {
        ConsoleNotifier { out: io::stdout() }
    }
}

impl<W: Write> ConsoleNotifier<W> {
    pub fn new(out: W) -> Self {
        ConsoleNotifier { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for ConsoleNotifier<W> {
    fn notify(&mut self, gifter: &str, message: &Message) -> Result<(), NotifyError> {
        let to_err = |source: io::Error| NotifyError::Io {
            path: PathBuf::from("<console>"),
            source,
        };
        writeln!(self.out, "=== {gifter}: {}", message.subject).map_err(to_err)?;
        writeln!(self.out, "{}", message.body).map_err(to_err)?;
        writeln!(self.out).map_err(to_err)
    }
}

/// Sends each gifter their own message, in roster order.
pub fn deliver<N: Notifier + ?Sized>(
    assignments: &Assignments,
    labels: Option<&[String]>,
    notifier: &mut N,
) -> Result<usize, DeliveryError> {
    let mut delivered = 0;
    for assignment in assignments.iter() {
        let message = compose_message(&assignment.gifter, &assignment.giftees, labels)?;
        notifier
            .notify(&assignment.gifter, &message)
            .map_err(|source| DeliveryError::Notify {
                gifter: assignment.gifter.clone(),
                source,
            })?;
        delivered += 1;
    }
    Ok(delivered)
}
