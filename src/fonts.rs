use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};
use thiserror::Error;

/// Well-known CJK fonts tried when no usable font is configured.
const FALLBACK_FONTS: &[&str] = &[
    "C:/Windows/Fonts/msjh.ttc",
    "C:/Windows/Fonts/msyh.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
];

const CJK_FONT_NAME: &str = "cjk";

#[derive(Debug, Error)]
pub enum FontResolutionError {
    #[error(
        "no CJK font found (configured: {:?}, tried {} system locations)",
        .configured,
        FALLBACK_FONTS.len()
    )]
    NoneFound { configured: Option<PathBuf> },
    #[error("reading font {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pick the font file: the configured path if it exists, otherwise the first
/// fallback that exists.
pub fn resolve_font(configured: Option<&Path>) -> Result<PathBuf, FontResolutionError> {
    resolve_from(configured, FALLBACK_FONTS.iter().map(Path::new))
}

fn resolve_from<'a>(
    configured: Option<&Path>,
    candidates: impl IntoIterator<Item = &'a Path>,
) -> Result<PathBuf, FontResolutionError> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        log::warn!(
            "Configured font {} does not exist, trying system fonts",
            path.display()
        );
    }
    candidates
        .into_iter()
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| FontResolutionError::NoneFound {
            configured: configured.map(Path::to_path_buf),
        })
}

/// Register the resolved CJK font as a fallback for both font families, so
/// Latin text keeps egui's default look.
pub fn install_cjk_font(
    ctx: &egui::Context,
    configured: Option<&Path>,
) -> Result<PathBuf, FontResolutionError> {
    let path = resolve_font(configured)?;
    let bytes = std::fs::read(&path).map_err(|source| FontResolutionError::Unreadable {
        path: path.clone(),
        source,
    })?;

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(CJK_FONT_NAME.to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);

    log::info!("Installed CJK font {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_font_wins_when_present() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve_from(Some(file.path()), [Path::new("/nope")]).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn missing_configured_font_falls_back_to_system_font() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let candidates = [Path::new("/missing/a.ttc"), file.path()];
        let resolved = resolve_from(Some(Path::new("/no/such/font.ttc")), candidates).unwrap();
        assert_eq!(resolved, file.path());
    }

    #[test]
    fn error_names_configured_font_when_nothing_resolves() {
        let err = resolve_from(Some(Path::new("/no/font.ttc")), [] as [&Path; 0]).unwrap_err();
        assert!(matches!(
            &err,
            FontResolutionError::NoneFound { configured: Some(p) } if p == Path::new("/no/font.ttc")
        ));
        assert!(err.to_string().contains("/no/font.ttc"));
    }

    #[test]
    fn first_existing_fallback_is_used() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let candidates = [Path::new("/missing/a.ttc"), file.path()];
        assert_eq!(resolve_from(None, candidates).unwrap(), file.path());
        assert!(matches!(
            resolve_from(None, [Path::new("/missing/a.ttc")]),
            Err(FontResolutionError::NoneFound { configured: None })
        ));
    }
}
