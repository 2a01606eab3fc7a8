use std::collections::HashMap;
use std::path::{Path, PathBuf};

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};

/// Menu icon textures keyed by file path. Failed loads are cached as `None`.
/// （以路徑快取的選單圖示材質。）
#[derive(Default)]
pub struct IconCache {
    textures: HashMap<PathBuf, Option<TextureHandle>>,
}

impl IconCache {
    pub fn texture(&mut self, ctx: &Context, path: &Path) -> Option<TextureId> {
        self.textures
            .entry(path.to_path_buf())
            .or_insert_with(|| load_texture(ctx, path))
            .as_ref()
            .map(TextureHandle::id)
    }
}

fn load_texture(ctx: &Context, path: &Path) -> Option<TextureHandle> {
    let image = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "failed to load menu icon");
            return None;
        }
    };
    let size = [image.width() as usize, image.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    Some(ctx.load_texture(path.display().to_string(), pixels, TextureOptions::LINEAR))
}
