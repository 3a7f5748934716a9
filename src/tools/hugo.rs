use super::sandbox::{Cmd, Sandbox};
use super::toolchain::{Tool, Toolchain};
use super::SiteGenerator;
use crate::directory::Directory;
use crate::error::Result;
use crate::options::BuildOptions;
use arkive::DB;
use tracing::info;

/// Where the generated site lands, relative to the project root.
pub const OUTPUT_DIR: &str = "public";

/// Builds sites with Hugo (extended), using Dart Sass for stylesheets.
pub struct Hugo<'a> {
    db: &'a DB,
    toolchain: Toolchain<'a>,
}

impl<'a> Hugo<'a> {
    pub fn new(db: &'a DB) -> Result<Self> {
        Ok(Self::with_toolchain(db, Toolchain::new(db)?))
    }

    pub fn with_toolchain(db: &'a DB, toolchain: Toolchain<'a>) -> Self {
        Self { db, toolchain }
    }

    /// Hugo and Dart Sass, installed as `options` asks.
    fn command(&self, options: &BuildOptions) -> Result<Cmd> {
        let mut cmd = Cmd::new("hugo").args(hugo_args(options));
        let sass = self
            .toolchain
            .install(Tool::DartSass, &options.css_preprocessor_version)?;
        let hugo = self.toolchain.install(Tool::Hugo, &options.generator_version)?;
        // Hugo's own directory goes first so it wins over anything in Sass's.
        for dir in [hugo, sass].into_iter().flatten() {
            cmd = cmd.path_prefix(dir);
        }
        Ok(cmd)
    }
}

pub fn hugo_args(options: &BuildOptions) -> Vec<String> {
    let mut args = vec!["--destination".to_owned(), OUTPUT_DIR.to_owned()];
    if options.minify {
        args.push("--minify".into());
    }
    if let Some(url) = &options.base_url {
        args.push("--baseURL".into());
        args.push(url.clone());
    }
    args
}

impl<'a> SiteGenerator for Hugo<'a> {
    fn generate(&self, project: &Directory, options: &BuildOptions) -> Result<Directory> {
        let cmd = self.command(options)?;
        let sandbox = Sandbox::new(self.db, project)?;
        sandbox.run(&cmd)?;
        let site = sandbox.collect(OUTPUT_DIR)?;
        info!(entries = site.ark().len(), "Generated site");
        Ok(site)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::options::ToolVersion;
    use arkive::{Ark, Contents};
    use indoc::indoc;
    use rusty_fork::rusty_fork_test;
    use std::os::unix::fs::PermissionsExt;

    /// Puts a stand-in `hugo` first on `PATH`. It records its arguments in
    /// the output dir and leaves a cache dir outside it.
    fn stand_in_hugo() -> Result<tempfile::TempDir> {
        let bin = tempfile::tempdir()?;
        let script = bin.path().join("hugo");
        std::fs::write(
            &script,
            indoc! {r#"
                #!/bin/sh
                mkdir -p "$2" resources
                echo "$@" > "$2/args.txt"
                echo '<html></html>' > "$2/index.html"
                echo cache > resources/cache.txt
            "#},
        )?;
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))?;
        let inherited = std::env::var_os("PATH").unwrap_or_default();
        let dirs = std::iter::once(bin.path().to_path_buf()).chain(std::env::split_paths(&inherited));
        std::env::set_var("PATH", std::env::join_paths(dirs).map_err(std::io::Error::other)?);
        Ok(bin)
    }

    fn generate_with_system_tools(base_url: Option<&str>) -> Result<(DB, Directory)> {
        let db = DB::new_temp()?;
        let project = Directory::store(
            &db,
            &Ark::from_entries([("hugo.toml", Contents::File("title = 'Example'"))]),
        )?;
        let opts = BuildOptions::new(base_url).with_versions(ToolVersion::System, ToolVersion::System);
        let site = Hugo::new(&db)?.generate(&project, &opts)?;
        Ok((db, site))
    }

    rusty_fork_test! {
        #[test]
        fn generate_collects_output_dir() {
            let _bin = stand_in_hugo().expect("stand-in hugo");
            let (db, site) = generate_with_system_tools(Some("https://example.com/")).expect("generate");

            assert!(site.contains("public/index.html"));
            assert!(!site.contains("hugo.toml"));
            assert!(!site.contains("resources/cache.txt"));
            assert_eq!(
                site.read_file(&db, "public/index.html").expect("read"),
                Some(b"<html></html>\n".to_vec())
            );
            assert_eq!(
                site.read_file(&db, "public/args.txt").expect("read"),
                Some(b"--destination public --minify --baseURL https://example.com/\n".to_vec())
            );
        }

        #[test]
        fn generate_without_base_url() {
            let _bin = stand_in_hugo().expect("stand-in hugo");
            let (db, site) = generate_with_system_tools(None).expect("generate");
            assert_eq!(
                site.read_file(&db, "public/args.txt").expect("read"),
                Some(b"--destination public --minify\n".to_vec())
            );
        }
    }

    #[test]
    fn args() {
        assert_eq!(
            hugo_args(&BuildOptions::new(None)),
            vec!["--destination", "public", "--minify"]
        );
        assert_eq!(
            hugo_args(&BuildOptions::new(Some("https://example.com/"))),
            vec![
                "--destination",
                "public",
                "--minify",
                "--baseURL",
                "https://example.com/"
            ]
        );

        let mut opts = BuildOptions::new(Some(""));
        opts.minify = false;
        assert_eq!(hugo_args(&opts), vec!["--destination", "public"]);
    }

    #[test]
    fn system_tools_use_path() -> Result<()> {
        let db = DB::new_temp()?;
        let hugo = Hugo::new(&db)?;
        let opts = BuildOptions::new(None).with_versions(ToolVersion::System, ToolVersion::System);
        let cmd = hugo.command(&opts)?;
        assert_eq!(cmd, Cmd::new("hugo").args(hugo_args(&opts)));
        Ok(())
    }

    #[test]
    #[ignore = "needs network"]
    fn real_hugo() -> Result<()> {
        let db = DB::new_temp()?;
        let project = Directory::store(
            &db,
            &Ark::from_entries([
                (
                    "hugo.toml",
                    Contents::File("title = 'Example'\ndisableKinds = ['taxonomy', 'term', 'RSS', 'sitemap']\n"),
                ),
                (
                    "layouts/index.html",
                    Contents::File(indoc! {r#"
                        <html>
                          <body>
                            <a href="{{ "about/" | absURL }}">About</a>
                          </body>
                        </html>
                    "#}),
                ),
            ]),
        )?;
        let site = Hugo::new(&db)?.generate(&project, &BuildOptions::new(Some("https://example.com/")))?;
        let index = site
            .read_file(&db, "public/index.html")?
            .expect("index.html");
        let index = String::from_utf8_lossy(&index);
        assert!(index.contains("https://example.com/about/"), "{}", index);
        Ok(())
    }
}
