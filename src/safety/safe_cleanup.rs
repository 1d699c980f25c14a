use crate::config::types::{QuestError, Result};
use nix::errno::Errno;
use std::ffi::{CStr, CString};
use std::fs;
use std::os::fd::RawFd;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Mode forced onto every directory and regular file before it is removed.
pub const FULL_ACCESS: libc::mode_t = 0o777;

struct FdGuard(RawFd);

impl FdGuard {
    fn new(fd: RawFd) -> Self {
        Self(fd)
    }

    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

impl Drop for FdGuard {
    fn drop(&mut self) {
        if self.0 >= 0 {
            unsafe {
                libc::close(self.0);
            }
        }
    }
}

/// Owns a `DIR*` opened with `fdopendir`; `closedir` also closes the fd.
struct DirStream(*mut libc::DIR);

impl Drop for DirStream {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe {
                libc::closedir(self.0);
            }
        }
    }
}

fn path_cstring(path: &Path) -> Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        QuestError::Filesystem(format!(
            "Path contains NUL byte and cannot be opened safely: {}",
            path.display()
        ))
    })
}

fn open_dir(path: &Path) -> Result<FdGuard> {
    let path_c = path_cstring(path)?;

    let fd = unsafe {
        libc::open(
            path_c.as_ptr(),
            libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC,
        )
    };
    if fd < 0 {
        return Err(QuestError::Filesystem(format!(
            "open directory failed for {}: {}",
            path.display(),
            std::io::Error::last_os_error()
        )));
    }

    Ok(FdGuard::new(fd))
}

fn fstatat_nofollow(parent_fd: RawFd, name: &CStr) -> Result<libc::stat> {
    let mut st = std::mem::MaybeUninit::<libc::stat>::zeroed();
    let rc = unsafe {
        libc::fstatat(
            parent_fd,
            name.as_ptr(),
            st.as_mut_ptr(),
            libc::AT_SYMLINK_NOFOLLOW,
        )
    };
    if rc != 0 {
        return Err(QuestError::Filesystem(format!(
            "fstatat failed for entry {:?}: {}",
            name,
            std::io::Error::last_os_error()
        )));
    }

    Ok(unsafe { st.assume_init() })
}

/// `fchmodat` follows symlinks, so callers only pass directories and regular files.
fn chmod_at(parent_fd: RawFd, name: &CStr, mode: libc::mode_t) -> Result<()> {
    let rc = unsafe { libc::fchmodat(parent_fd, name.as_ptr(), mode, 0) };
    if rc != 0 {
        return Err(QuestError::Filesystem(format!(
            "fchmodat {:o} failed for entry {:?}: {}",
            mode,
            name,
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

fn remove_entry_at(parent_fd: RawFd, name: &CStr, flags: i32) -> Result<()> {
    let rc = unsafe { libc::unlinkat(parent_fd, name.as_ptr(), flags) };
    if rc != 0 {
        return Err(QuestError::Filesystem(format!(
            "unlinkat failed for entry {:?}: {}",
            name,
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

fn remove_non_dir_at(parent_fd: RawFd, name: &CStr, st: &libc::stat) -> Result<()> {
    if st.st_mode & libc::S_IFMT == libc::S_IFREG {
        chmod_at(parent_fd, name, FULL_ACCESS)?;
    }
    remove_entry_at(parent_fd, name, 0)
}

fn recurse_remove_dir(parent_fd: RawFd, name: &CStr, root_dev: libc::dev_t) -> Result<()> {
    // Execute-only directories cannot be opened for reading until unlocked.
    chmod_at(parent_fd, name, FULL_ACCESS)?;

    let child_fd = unsafe {
        libc::openat(
            parent_fd,
            name.as_ptr(),
            libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC | libc::O_NOFOLLOW,
        )
    };
    if child_fd < 0 {
        return Err(QuestError::Filesystem(format!(
            "openat failed for child directory {:?}: {}",
            name,
            std::io::Error::last_os_error()
        )));
    }
    let child_guard = FdGuard::new(child_fd);

    remove_dir_contents_fd(child_guard.as_raw_fd(), root_dev)?;
    remove_entry_at(parent_fd, name, libc::AT_REMOVEDIR)
}

fn remove_dir_contents_fd(dir_fd: RawFd, root_dev: libc::dev_t) -> Result<()> {
    let iter_fd = unsafe { libc::dup(dir_fd) };
    if iter_fd < 0 {
        return Err(QuestError::Filesystem(format!(
            "dup for directory iteration failed: {}",
            std::io::Error::last_os_error()
        )));
    }

    let dir = unsafe { libc::fdopendir(iter_fd) };
    if dir.is_null() {
        unsafe {
            libc::close(iter_fd);
        }
        return Err(QuestError::Filesystem(format!(
            "fdopendir failed: {}",
            std::io::Error::last_os_error()
        )));
    }
    let stream = DirStream(dir);

    loop {
        Errno::clear();
        let entry = unsafe { libc::readdir(stream.0) };
        if entry.is_null() {
            let errno = Errno::last();
            if errno != Errno::UnknownErrno {
                return Err(QuestError::Filesystem(format!("readdir failed: {}", errno)));
            }
            break;
        }

        let name = unsafe { CStr::from_ptr((*entry).d_name.as_ptr()) }.to_owned();
        let bytes = name.to_bytes();
        if bytes == b"." || bytes == b".." {
            continue;
        }

        let st = fstatat_nofollow(dir_fd, &name)?;
        if st.st_mode & libc::S_IFMT == libc::S_IFDIR {
            if st.st_dev != root_dev {
                return Err(QuestError::Filesystem(format!(
                    "Refusing to cross filesystem boundary at directory {:?}",
                    name
                )));
            }
            recurse_remove_dir(dir_fd, &name, root_dev)?;
        } else {
            remove_non_dir_at(dir_fd, &name, &st)?;
        }
    }

    Ok(())
}

/// Unlock and remove a tree without following symlinks.
///
/// Every directory and regular file is set to `0777` before it is touched, so
/// trees left execute-only or read-only by a previous challenge still come
/// down. A missing path is not an error.
pub fn remove_tree_forced(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(QuestError::Io(e)),
    }

    let parent = match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Path::new("."),
        Some(p) => p,
        None => {
            return Err(QuestError::Filesystem(format!(
                "Cannot remove path without parent: {}",
                path.display()
            )))
        }
    };
    let name_os = path.file_name().ok_or_else(|| {
        QuestError::Filesystem(format!(
            "Cannot remove path without file name: {}",
            path.display()
        ))
    })?;
    let name_c = CString::new(name_os.as_bytes()).map_err(|_| {
        QuestError::Filesystem(format!(
            "Path contains NUL byte and cannot be removed safely: {}",
            path.display()
        ))
    })?;

    let parent_fd = open_dir(parent)?;
    let st = fstatat_nofollow(parent_fd.as_raw_fd(), &name_c)?;

    if st.st_mode & libc::S_IFMT == libc::S_IFDIR {
        recurse_remove_dir(parent_fd.as_raw_fd(), &name_c, st.st_dev)?;
    } else {
        remove_non_dir_at(parent_fd.as_raw_fd(), &name_c, &st)?;
    }

    log::debug!("Removed tree {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn set_mode(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_missing_path_is_ok() {
        let temp = tempfile::TempDir::new().unwrap();
        remove_tree_forced(&temp.path().join("nothing-here")).unwrap();
    }

    #[test]
    fn test_removes_locked_tree() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = temp.path().join("locked");
        let inner = root.join("a").join("b");
        fs::create_dir_all(&inner).unwrap();
        fs::write(inner.join("note.txt"), b"hidden").unwrap();

        set_mode(&inner.join("note.txt"), 0o444);
        set_mode(&inner, 0o111);
        set_mode(&root.join("a"), 0o111);
        set_mode(&root, 0o111);

        remove_tree_forced(&root).unwrap();
        assert!(fs::symlink_metadata(&root).is_err());
    }

    #[test]
    fn test_removes_single_read_only_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("ro.txt");
        fs::write(&file, b"x").unwrap();
        set_mode(&file, 0o444);

        remove_tree_forced(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_does_not_follow_symlinks() {
        let temp = tempfile::TempDir::new().unwrap();
        let outside = temp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("keep.txt"), b"keep").unwrap();
        set_mode(&outside, 0o755);

        let root = temp.path().join("tree");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        remove_tree_forced(&root).unwrap();

        assert!(!root.exists());
        assert!(outside.join("keep.txt").exists());
        let mode = fs::metadata(&outside).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755, "symlink target permissions must be untouched");
    }
}
