// tests/spec_workflow.rs

//! Spec persistence, spec fetching and install ordering.

mod common;

use common::{temp_options, FakePool};
use debclosure::packages::{DebArchiveSource, MetadataSource};
use debclosure::pool::fetch_spec;
use debclosure::resolver::{InstallBatches, Installer, Resolver};
use debclosure::spec::PackageSpec;
use std::fs::{self, File};
use xz2::write::XzEncoder;

#[test]
fn test_resolved_spec_round_trips_through_file() {
    let pool = FakePool::new()
        .with("linux-image-2.6.24-16-generic", "2.6.24-16.30", "initramfs-tools")
        .with("initramfs-tools", "0.85eubuntu36", "")
        .with("perl", "1:5.8.8-12", "");
    let (tmp, options) = temp_options(false);
    let mut resolver = Resolver::new(pool, DebArchiveSource::new(), options);
    let spec = resolver
        .resolve_plan(["linux-image-2.6.24-16-generic", "perl5"])
        .unwrap();

    let path = tmp.path().join("spec");
    spec.write(&path).unwrap();

    let mut reread = PackageSpec::new();
    reread.read(path.to_str().unwrap()).unwrap();
    assert_eq!(reread, spec);
    assert_eq!(reread.version("perl"), Some("5.8.8-12"));
}

#[test]
fn test_fetch_spec_then_install_order() {
    let pool = FakePool::new()
        .with("bash", "4.1-3", "")
        .with("linux-image-3.2.0-4-686-pae", "3.2.57-3", "")
        .with("coreutils", "8.13-3.5", "");
    let tmp = tempfile::tempdir().unwrap();
    let outdir = tmp.path().join("var/cache/apt/archives");

    let spec: PackageSpec = "\
# pinned by hand
bash=4.1-3
coreutils=8.13-3.5
linux-image-3.2.0-4-686-pae=3.2.57-3
"
    .parse()
    .unwrap();
    fetch_spec(&pool, &spec, &outdir).unwrap();

    assert_eq!(
        *pool.fetches.borrow(),
        vec![vec![
            "bash=4.1-3".to_string(),
            "coreutils=8.13-3.5".to_string(),
            "linux-image-3.2.0-4-686-pae=3.2.57-3".to_string(),
        ]]
    );

    let from_dir = InstallBatches::from_dir(&outdir).unwrap();
    assert_eq!(from_dir, InstallBatches::from_spec(&spec));
    assert_eq!(from_dir.preinstall, vec!["linux-image-3.2.0-4-686-pae"]);
    assert_eq!(from_dir.general, vec!["bash", "coreutils"]);

    #[derive(Default)]
    struct Log(Vec<String>);

    impl Installer for Log {
        fn install_batch(&mut self, names: &[String]) -> debclosure::Result<()> {
            self.0.push(names.join(" "));
            Ok(())
        }
    }

    let mut log = Log::default();
    log.install_all(&from_dir).unwrap();
    assert_eq!(log.0, vec!["linux-image-3.2.0-4-686-pae", "bash coreutils"]);
}

#[test]
fn test_reads_xz_control_member() {
    let tmp = tempfile::tempdir().unwrap();
    let control = "Package: dash\nVersion: 0.5.4-8\nPre-Depends: libc6 (>= 2.7-1)\n";

    let mut tarball = tar::Builder::new(XzEncoder::new(Vec::new(), 6));
    let mut header = tar::Header::new_gnu();
    header.set_size(control.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tarball
        .append_data(&mut header, "control", control.as_bytes())
        .unwrap();
    let control_tar = tarball.into_inner().unwrap().finish().unwrap();

    let path = tmp.path().join("dash_0.5.4-8_i386.deb");
    let mut archive = ar::Builder::new(File::create(&path).unwrap());
    for (member, data) in [
        ("debian-binary", b"2.0\n".to_vec()),
        ("control.tar.xz", control_tar),
    ] {
        let header = ar::Header::new(member.as_bytes().to_vec(), data.len() as u64);
        archive.append(&header, data.as_slice()).unwrap();
    }
    drop(archive);

    let source = DebArchiveSource::new();
    let fields = source.read_control(&path).unwrap();
    assert!(fields.has("Pre-Depends"));

    let meta = source.read_metadata("dash", &path).unwrap();
    assert_eq!(meta.version, "0.5.4-8");
    assert!(meta.dependency_groups.is_empty());
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
