//! The reference-label restyling pass.

use std::io::Write;

use crate::error::KiCadError;
use crate::host::{BoardHandle, BoardHost};
use crate::model::board::{layer_name, LabelStyle, SizedText};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AdjustOptions {
    pub style: LabelStyle,
    /// Report and restyle in memory, but never push the result to the host.
    pub dry_run: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdjustReport {
    pub board: BoardHandle,
    pub footprints: usize,
    pub pushed: bool,
}

/// Restyles the reference label of every footprint on `board`.
///
/// Writes one `module ref <designator> <layer>` line per footprint to `out`, in
/// the order the host lists them, then sends all restyled footprints back in a
/// single update. A board without footprints produces no output and no update.
/// Host failures propagate as-is; footprints already reported are not rolled back.
pub async fn adjust_reference_labels<H, W>(
    host: &H,
    board: &BoardHandle,
    options: AdjustOptions,
    out: &mut W,
) -> Result<AdjustReport, KiCadError>
where
    H: BoardHost,
    W: Write,
{
    let mut footprints = host.footprints(board).await?;
    tracing::debug!(board = %board, count = footprints.len(), "enumerated footprints");

    for footprint in &mut footprints {
        let label = &mut footprint.reference_label;
        writeln!(
            out,
            "module ref {} {}",
            footprint.reference,
            layer_name(label.layer())
        )?;
        options.style.apply(label);
    }
    out.flush()?;

    let pushed = !footprints.is_empty() && !options.dry_run;
    if pushed {
        host.update_footprints(board, &footprints).await?;
    }

    tracing::info!(
        board = %board,
        footprints = footprints.len(),
        style = %options.style,
        dry_run = options.dry_run,
        "reference labels adjusted"
    );

    Ok(AdjustReport {
        board: board.clone(),
        footprints: footprints.len(),
        pushed,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::{adjust_reference_labels, AdjustOptions};
    use crate::error::KiCadError;
    use crate::host::{self, BoardHandle, BoardHost, BoardTarget};
    use crate::model::board::{
        Footprint, LabelStyle, ReferenceLabel, SizedText, Vector2Nm, LAYER_B_CU, LAYER_F_CU,
        LAYER_F_SILKS,
    };
    use crate::model::common::{DocumentSpecifier, DocumentType, ProjectInfo};

    /// In-memory stand-in for a KiCad session with any number of open boards.
    #[derive(Default)]
    struct FakeHost {
        boards: Mutex<Vec<(DocumentSpecifier, Vec<Footprint>)>>,
        updates: Mutex<usize>,
        fail_updates: bool,
    }

    impl FakeHost {
        fn with_board(self, dir: &str, file: &str, footprints: Vec<Footprint>) -> Self {
            let doc = DocumentSpecifier {
                document_type: DocumentType::Pcb,
                board_filename: Some(file.to_string()),
                project: ProjectInfo {
                    name: None,
                    path: Some(PathBuf::from(dir)),
                },
            };
            self.boards
                .lock()
                .expect("fake host lock")
                .push((doc, footprints));
            self
        }

        fn footprints_of(&self, file: &str) -> Vec<Footprint> {
            self.boards
                .lock()
                .expect("fake host lock")
                .iter()
                .find(|(doc, _)| doc.board_filename.as_deref() == Some(file))
                .map(|(_, footprints)| footprints.clone())
                .unwrap_or_default()
        }

        fn update_count(&self) -> usize {
            *self.updates.lock().expect("fake host lock")
        }
    }

    impl BoardHost for FakeHost {
        async fn open_board(&self, target: &BoardTarget) -> Result<BoardHandle, KiCadError> {
            let boards = self.boards.lock().expect("fake host lock");
            let docs: Vec<DocumentSpecifier> = boards.iter().map(|(doc, _)| doc.clone()).collect();
            let selected = host::select_board(&docs, target)?;
            Ok(BoardHandle::new(selected.clone()))
        }

        async fn footprints(&self, board: &BoardHandle) -> Result<Vec<Footprint>, KiCadError> {
            let boards = self.boards.lock().expect("fake host lock");
            boards
                .iter()
                .find(|(doc, _)| doc == board.document())
                .map(|(_, footprints)| footprints.clone())
                .ok_or_else(|| KiCadError::ItemStatus {
                    code: "IRS_DOCUMENT_NOT_FOUND".to_string(),
                })
        }

        async fn update_footprints(
            &self,
            board: &BoardHandle,
            footprints: &[Footprint],
        ) -> Result<(), KiCadError> {
            if self.fail_updates {
                return Err(KiCadError::ApiStatus {
                    code: "AS_BUSY".to_string(),
                    message: "KiCad is busy".to_string(),
                });
            }

            *self.updates.lock().expect("fake host lock") += 1;
            let mut boards = self.boards.lock().expect("fake host lock");
            let (_, stored) = boards
                .iter_mut()
                .find(|(doc, _)| doc == board.document())
                .ok_or(KiCadError::BoardNotOpen)?;
            for updated in footprints {
                if let Some(slot) = stored.iter_mut().find(|fp| fp.id == updated.id) {
                    slot.reference_label = updated.reference_label.clone();
                }
            }
            Ok(())
        }
    }

    fn footprint(id: &str, reference: &str, label_layer: i32, size_mm: f64) -> Footprint {
        let size_nm = (size_mm * 1_000_000.0) as i64;
        Footprint {
            id: Some(id.to_string()),
            reference: reference.to_string(),
            layer: label_layer,
            reference_label: ReferenceLabel {
                layer: label_layer,
                size_nm: Some(Vector2Nm {
                    x_nm: size_nm,
                    y_nm: size_nm,
                }),
                thickness_nm: Some(120_000),
            },
            encoded: Vec::new(),
        }
    }

    fn assert_default_style(footprints: &[Footprint]) {
        for fp in footprints {
            assert_eq!(
                fp.reference_label.size(),
                Some(Vector2Nm {
                    x_nm: 2_000_000,
                    y_nm: 2_000_000
                }),
                "size of {}",
                fp.reference
            );
            assert_eq!(
                fp.reference_label.thickness(),
                Some(300_000),
                "thickness of {}",
                fp.reference
            );
        }
    }

    fn output_lines(out: &[u8]) -> Vec<String> {
        String::from_utf8(out.to_vec())
            .expect("output should be utf-8")
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn restyles_front_and_back_footprints_and_reports_layers() {
        let host = FakeHost::default().with_board(
            "/work/demo",
            "demo.kicad_pcb",
            vec![
                footprint("a", "R1", LAYER_F_CU, 1.0),
                footprint("b", "C1", LAYER_B_CU, 1.27),
            ],
        );

        let board = host
            .open_board(&BoardTarget::Current)
            .await
            .expect("single open board should resolve");
        let mut out = Vec::new();
        let report = adjust_reference_labels(&host, &board, AdjustOptions::default(), &mut out)
            .await
            .expect("adjust should succeed");

        assert_eq!(
            output_lines(&out),
            vec!["module ref R1 F.Cu", "module ref C1 B.Cu"]
        );
        assert_eq!(report.footprints, 2);
        assert!(report.pushed);
        assert_eq!(host.update_count(), 1);
        assert_default_style(&host.footprints_of("demo.kicad_pcb"));
    }

    #[tokio::test]
    async fn rerunning_is_idempotent() {
        let host = FakeHost::default().with_board(
            "/work/demo",
            "demo.kicad_pcb",
            vec![footprint("a", "U1", LAYER_F_SILKS, 0.8)],
        );
        let board = host
            .open_board(&BoardTarget::Current)
            .await
            .expect("board should resolve");

        for _ in 0..2 {
            let mut out = Vec::new();
            adjust_reference_labels(&host, &board, AdjustOptions::default(), &mut out)
                .await
                .expect("adjust should succeed");
            assert_eq!(output_lines(&out), vec!["module ref U1 F.SilkS"]);
            assert_default_style(&host.footprints_of("demo.kicad_pcb"));
        }
    }

    #[tokio::test]
    async fn empty_board_prints_nothing_and_skips_update() {
        let host = FakeHost::default().with_board("/work/empty", "empty.kicad_pcb", Vec::new());
        let board = host
            .open_board(&BoardTarget::Current)
            .await
            .expect("board should resolve");

        let mut out = Vec::new();
        let report = adjust_reference_labels(&host, &board, AdjustOptions::default(), &mut out)
            .await
            .expect("empty board is not an error");

        assert!(out.is_empty());
        assert_eq!(report.footprints, 0);
        assert!(!report.pushed);
        assert_eq!(host.update_count(), 0);
    }

    #[tokio::test]
    async fn file_target_only_touches_the_named_board() {
        let host = FakeHost::default()
            .with_board(
                "/work/a",
                "a.kicad_pcb",
                vec![footprint("a1", "R1", LAYER_F_SILKS, 1.0)],
            )
            .with_board(
                "/work/b",
                "b.kicad_pcb",
                vec![
                    footprint("b1", "R7", LAYER_F_SILKS, 1.0),
                    footprint("b2", "R8", LAYER_F_SILKS, 1.0),
                    footprint("b3", "R9", LAYER_F_SILKS, 1.0),
                ],
            );

        let board = host
            .open_board(&BoardTarget::File(PathBuf::from("/work/b/b.kicad_pcb")))
            .await
            .expect("named board should resolve");
        let mut out = Vec::new();
        adjust_reference_labels(&host, &board, AdjustOptions::default(), &mut out)
            .await
            .expect("adjust should succeed");

        assert_eq!(output_lines(&out).len(), 3);
        assert_default_style(&host.footprints_of("b.kicad_pcb"));
        let untouched = host.footprints_of("a.kicad_pcb");
        assert_eq!(untouched[0].reference_label.thickness(), Some(120_000));
    }

    #[tokio::test]
    async fn current_target_with_no_board_is_a_checked_error() {
        let host = FakeHost::default();
        let result = host.open_board(&BoardTarget::Current).await;
        assert!(matches!(result, Err(KiCadError::BoardNotOpen)));
    }

    #[tokio::test]
    async fn dry_run_reports_without_pushing() {
        let host = FakeHost::default().with_board(
            "/work/demo",
            "demo.kicad_pcb",
            vec![footprint("a", "J1", LAYER_F_SILKS, 1.0)],
        );
        let board = host
            .open_board(&BoardTarget::Current)
            .await
            .expect("board should resolve");

        let options = AdjustOptions {
            style: LabelStyle::default(),
            dry_run: true,
        };
        let mut out = Vec::new();
        let report = adjust_reference_labels(&host, &board, options, &mut out)
            .await
            .expect("dry run should succeed");

        assert_eq!(output_lines(&out), vec!["module ref J1 F.SilkS"]);
        assert!(!report.pushed);
        assert_eq!(host.update_count(), 0);
        assert_eq!(
            host.footprints_of("demo.kicad_pcb")[0]
                .reference_label
                .thickness(),
            Some(120_000)
        );
    }

    #[tokio::test]
    async fn update_failure_propagates_after_reporting() {
        let host = FakeHost {
            fail_updates: true,
            ..FakeHost::default()
        }
        .with_board(
            "/work/demo",
            "demo.kicad_pcb",
            vec![footprint("a", "R1", LAYER_F_SILKS, 1.0)],
        );
        let board = host
            .open_board(&BoardTarget::Current)
            .await
            .expect("board should resolve");

        let mut out = Vec::new();
        let result =
            adjust_reference_labels(&host, &board, AdjustOptions::default(), &mut out).await;

        assert!(matches!(result, Err(KiCadError::ApiStatus { .. })));
        assert_eq!(output_lines(&out), vec!["module ref R1 F.SilkS"]);
    }

    #[tokio::test]
    async fn custom_style_is_applied() {
        let host = FakeHost::default().with_board(
            "/work/demo",
            "demo.kicad_pcb",
            vec![footprint("a", "D1", LAYER_F_SILKS, 1.0)],
        );
        let board = host
            .open_board(&BoardTarget::Current)
            .await
            .expect("board should resolve");

        let options = AdjustOptions {
            style: LabelStyle::from_mm(1.0, 1.2, 0.15).expect("style should be valid"),
            dry_run: false,
        };
        adjust_reference_labels(&host, &board, options, &mut Vec::new())
            .await
            .expect("adjust should succeed");

        let label = &host.footprints_of("demo.kicad_pcb")[0].reference_label;
        assert_eq!(
            label.size(),
            Some(Vector2Nm {
                x_nm: 1_000_000,
                y_nm: 1_200_000
            })
        );
        assert_eq!(label.thickness(), Some(150_000));
    }
}
