//! Idea command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// The synchronized IDE module.
#[derive(Debug, Serialize)]
pub struct IdeaReport {
    pub source_dirs: Vec<PathBuf>,
    pub test_source_dirs: Vec<PathBuf>,
    pub exclude_dirs: Vec<PathBuf>,
}

impl Report for IdeaReport {
    fn render(&self, out: &mut dyn Output) {
        let sections = [
            ("source dirs", &self.source_dirs),
            ("test source dirs", &self.test_source_dirs),
            ("exclude dirs", &self.exclude_dirs),
        ];
        for (i, (name, dirs)) in sections.into_iter().enumerate() {
            if i > 0 {
                out.newline();
            }
            out.section(name);
            for dir in dirs {
                out.list_item(&dir.display().to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render() {
        let report = IdeaReport {
            source_dirs: vec![
                PathBuf::from("build/generated-main-avro-source"),
                PathBuf::from("src/main/avro"),
            ],
            test_source_dirs: vec![PathBuf::from("src/test/avro")],
            exclude_dirs: Vec::new(),
        };

        let mut out = BufferOutput::default();
        report.render(&mut out);

        insta::assert_snapshot!(out.text, @r"
        source dirs:
          - build/generated-main-avro-source
          - src/main/avro

        test source dirs:
          - src/test/avro

        exclude dirs:
        ");
    }
}
