//! # Theme Directory Tests
//!
//! Loads complete and broken themes written to scratch directories.

use std::fs;
use std::path::{Path, PathBuf};

use tessera_theme::DirectoryAssets;
use tessera_ui::entity::{ButtonSkin, SliderSkin};
use tessera_ui::style::{FontStyle, InteractionState, PropertyId, Resolver, StyleKey};
use tessera_ui::{
    Anchor, CommandList, CursorType, Entity, InputSnapshot, PanelSkin, Theme, UiConfig, UiContext, UiError,
    Vec2,
};

const STATE_SUFFIXES: [&str; 3] = ["", "_hover", "_down"];

struct ThemeDir(PathBuf);

impl ThemeDir {
    /// A complete theme; `skip` names texture paths that are not written.
    fn complete(name: &str, skip: &[&str]) -> Self {
        let root = std::env::temp_dir().join(format!("tessera_theme_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        for dir in ["textures/icons", "fonts", "styles"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }

        let mut textures: Vec<String> = PanelSkin::TEXTURED
            .iter()
            .filter_map(|s| s.file_stem())
            .map(str::to_owned)
            .collect();
        for skin in ButtonSkin::ALL {
            textures.extend(STATE_SUFFIXES.iter().map(|s| format!("{}{s}", skin.file_stem())));
        }
        for stem in ["checkbox", "radio"] {
            textures.extend(STATE_SUFFIXES.iter().map(|s| format!("{stem}{s}")));
        }
        for skin in SliderSkin::ALL {
            textures.push(skin.file_stem().to_owned());
            textures.push(format!("{}_mark", skin.file_stem()));
        }
        textures.extend(
            [
                "white_texture",
                "progressbar",
                "progressbar_fill",
                "horizontal_line",
                "scrollbar",
                "scrollbar_mark",
                "arrow_down",
                "arrow_up",
                "icons/background",
            ]
            .map(str::to_owned),
        );
        textures.extend(CursorType::ALL.map(|c| format!("cursor_{}", c.name())));
        for stem in textures {
            let path = format!("textures/{stem}");
            if !skip.contains(&path.as_str()) {
                fs::write(root.join(format!("{path}.png")), b"png").unwrap();
            }
        }

        for style in FontStyle::ALL {
            fs::write(
                root.join(format!("fonts/{}.toml", style.name())),
                "line_height = 20.0\ndefault_advance = 10.0\n\n[advances]\n\"i\" = 4.0\n",
            )
            .unwrap();
        }
        for cursor in CursorType::ALL {
            fs::write(
                root.join(format!("textures/cursor_{}_md.toml", cursor.name())),
                "draw_width = 32.0\n",
            )
            .unwrap();
        }
        for key in StyleKey::ALL {
            fs::write(
                root.join(format!("styles/{}-Default.toml", key.name())),
                "FillColor = \"#FFFFFF\"\nPadding = [12.0, 12.0]\nSpaceAfter = [0.0, 6.0]\n",
            )
            .unwrap();
        }
        Self(root)
    }

    fn path(&self) -> &Path {
        &self.0
    }

    fn write(&self, relative: &str, text: &str) {
        fs::write(self.0.join(relative), text).unwrap();
    }
}

impl Drop for ThemeDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Test: a complete theme directory loads and drives a frame.
#[test]
fn test_complete_theme_loads() {
    let dir = ThemeDir::complete("complete", &[]);
    dir.write("styles/Button-MouseHover.toml", "Scale = 1.25\n");
    let config = UiConfig {
        theme: Some(dir.path().to_path_buf()),
        ..UiConfig::default()
    };
    let mut assets = DirectoryAssets::from_config(&config).unwrap();
    let theme = Theme::load(&mut assets).unwrap();

    let sheet = theme.styles.sheet(StyleKey::Button);
    let hover = Resolver::new(None, sheet, InteractionState::MouseHover);
    assert_eq!(hover.scalar(PropertyId::Scale), 1.25);
    assert_eq!(hover.vector(PropertyId::Padding), Vec2::new(12.0, 12.0));

    let handle = theme.button(ButtonSkin::Default, InteractionState::MouseDown);
    assert_eq!(
        assets.texture_file(handle),
        Some(dir.path().join("textures/button_default_down.png").as_path())
    );

    let mut ui = UiContext::new(config, theme);
    let panel = ui.add_entity(Entity::panel((400.0, 300.0), PanelSkin::Default, Anchor::Center));
    ui.add_child(panel, Entity::button("ok")).unwrap();
    let mut renderer = CommandList::new();
    ui.update(&InputSnapshot::new(), 0.0);
    ui.draw(&mut renderer);
    assert!(renderer.command_count() > 0);
}

/// Test: a missing required texture aborts the load with its path.
#[test]
fn test_missing_texture_is_reported() {
    let dir = ThemeDir::complete("missing", &["textures/scrollbar_mark"]);
    let err = Theme::load(&mut DirectoryAssets::new(dir.path())).unwrap_err();
    assert_eq!(err, UiError::missing("textures/scrollbar_mark"));
}

/// Test: renamed panel skins resolve through the legacy alias.
#[test]
fn test_legacy_golden_panel() {
    let dir = ThemeDir::complete("golden", &["textures/panel_alternative"]);
    dir.write("textures/panel_golden.png", "png");
    let mut assets = DirectoryAssets::new(dir.path());
    let theme = Theme::load(&mut assets).unwrap();

    let handle = theme.panel(PanelSkin::Alternative).unwrap();
    assert_eq!(
        assets.texture_file(handle),
        Some(dir.path().join("textures/panel_golden.png").as_path())
    );
}

/// Test: unknown keys are rejected with file and line.
#[test]
fn test_unknown_key_names_line() {
    let dir = ThemeDir::complete("unknown_key", &[]);
    dir.write("styles/Paragraph-MouseDown.toml", "Scale = 1.0\n\nColour = \"#000000\"\n");
    match Theme::load(&mut DirectoryAssets::new(dir.path())).unwrap_err() {
        UiError::InvalidStyleDocument { file, line, .. } => {
            assert_eq!(file, "styles/Paragraph-MouseDown.toml");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

/// Test: malformed colors are rejected with their line.
#[test]
fn test_bad_color_names_line() {
    let dir = ThemeDir::complete("bad_color", &[]);
    dir.write("styles/Header-Default.toml", "Scale = 1.0\nOutlineWidth = 2\nFillColor = \"#12345\"\n");
    assert!(matches!(
        Theme::load(&mut DirectoryAssets::new(dir.path())),
        Err(UiError::InvalidStyleDocument { line: 3, .. })
    ));
}

/// Test: font tables drive text measurement.
#[test]
fn test_font_tables_measure_text() {
    let dir = ThemeDir::complete("fonts", &[]);
    let theme = Theme::load(&mut DirectoryAssets::new(dir.path())).unwrap();
    let font = theme.font(FontStyle::Regular);
    assert_eq!(font.line_width("hi", 1.0), 14.0);
    assert_eq!(font.line_height(2.0), 40.0);

    dir.write("fonts/Bold.toml", "line_height = 20.0\n");
    assert!(matches!(
        Theme::load(&mut DirectoryAssets::new(dir.path())),
        Err(UiError::InvalidStyleDocument { .. })
    ));
}

/// Test: cursor textures and their metadata load per type.
#[test]
fn test_cursor_metadata_loads() {
    let dir = ThemeDir::complete("cursors", &[]);
    dir.write("textures/cursor_ibeam_md.toml", "draw_width = 16.0\noffset = [-8.0, -8.0]\n");
    let mut assets = DirectoryAssets::new(dir.path());
    let theme = Theme::load(&mut assets).unwrap();

    let ibeam = theme.cursor(CursorType::IBeam);
    assert_eq!(ibeam.data.draw_width, 16.0);
    assert_eq!(ibeam.bounds(Vec2::new(100.0, 100.0), 1.0).x, 92.0);
    assert_eq!(
        assets.texture_file(ibeam.texture),
        Some(dir.path().join("textures/cursor_ibeam.png").as_path())
    );
    assert_eq!(theme.cursor(CursorType::Default).data.draw_width, 32.0);

    let broken = ThemeDir::complete("cursors_broken", &[]);
    fs::remove_file(broken.path().join("textures/cursor_pointer_md.toml")).unwrap();
    assert_eq!(
        Theme::load(&mut DirectoryAssets::new(broken.path())).unwrap_err(),
        UiError::missing("textures/cursor_pointer_md")
    );
}
