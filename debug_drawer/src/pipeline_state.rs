//! Pipeline state cache.
//!
//! Every debug draw binds one of twelve materials, selected by a
//! [`PipelineKey`]: depth test (off/on) × cull mode (off/front/back) ×
//! shading (colored/shaded). [`PipelineStateCache`] creates all of them once
//! per render context and hands them out by O(1) index.

use crate::render_context::{MaterialDescriptor, MaterialId, RenderContext, ShaderId, WHITE};
use crate::shader::{COLORED_SHADER, FALLBACK_SHADER, SHADED_SHADER};

/// Depth test setting of a debug draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthTest {
    /// Always drawn on top of scene geometry.
    Off,
    /// Obscured by closer scene geometry.
    #[default]
    On,
}

impl DepthTest {
    /// All settings in replay order.
    pub const ALL: [DepthTest; 2] = [DepthTest::Off, DepthTest::On];

    fn index(self) -> usize {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl From<bool> for DepthTest {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

/// Face culling of a debug draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullMode {
    /// Both faces are drawn.
    #[default]
    Off,
    /// Front faces are culled.
    Front,
    /// Back faces are culled.
    Back,
}

impl CullMode {
    /// All modes in replay order.
    pub const ALL: [CullMode; 3] = [CullMode::Off, CullMode::Front, CullMode::Back];

    fn index(self) -> usize {
        match self {
            Self::Off => 0,
            Self::Front => 1,
            Self::Back => 2,
        }
    }
}

/// Whether a draw uses the flat-lit shader or plain vertex colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shading {
    /// Unlit vertex color × tint.
    #[default]
    Colored,
    /// Flat lighting × tint.
    Shaded,
}

impl Shading {
    fn index(self) -> usize {
        match self {
            Self::Colored => 0,
            Self::Shaded => 1,
        }
    }

    fn shader_name(self) -> &'static str {
        match self {
            Self::Colored => COLORED_SHADER,
            Self::Shaded => SHADED_SHADER,
        }
    }
}

/// The (depth test, cull mode, shading) tuple selecting a cached material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PipelineKey {
    pub depth_test: DepthTest,
    pub cull_mode: CullMode,
    pub shading: Shading,
}

impl PipelineKey {
    /// Number of distinct keys.
    pub const COUNT: usize = 12;

    /// Number of (depth test, cull mode) pairs, i.e. line buckets.
    pub const BUCKET_COUNT: usize = 6;

    /// Create a key.
    pub fn new(depth_test: DepthTest, cull_mode: CullMode, shading: Shading) -> Self {
        Self {
            depth_test,
            cull_mode,
            shading,
        }
    }

    /// Table index in `0..COUNT`.
    #[inline]
    pub fn index(&self) -> usize {
        self.shading.index() * Self::BUCKET_COUNT + self.bucket_index()
    }

    /// Index of the (depth test, cull mode) pair in `0..BUCKET_COUNT`,
    /// ordered depth test first, then cull mode.
    #[inline]
    pub fn bucket_index(&self) -> usize {
        self.depth_test.index() * CullMode::ALL.len() + self.cull_mode.index()
    }

    /// The colored key for a line bucket index.
    pub fn from_bucket_index(index: usize) -> Self {
        let depth_test = DepthTest::ALL[index / CullMode::ALL.len()];
        let cull_mode = CullMode::ALL[index % CullMode::ALL.len()];
        Self::new(depth_test, cull_mode, Shading::Colored)
    }

    /// Every key, in table order.
    pub fn all() -> impl Iterator<Item = PipelineKey> {
        [Shading::Colored, Shading::Shaded].into_iter().flat_map(|shading| {
            (0..Self::BUCKET_COUNT).map(move |bucket| Self {
                shading,
                ..Self::from_bucket_index(bucket)
            })
        })
    }
}

/// Fixed table of debug materials, one per [`PipelineKey`].
///
/// Entries are `None` when neither the requested shader nor any fallback
/// could be found; draws that need such an entry are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStateCache {
    materials: [Option<MaterialId>; PipelineKey::COUNT],
}

impl PipelineStateCache {
    /// Create every material from the given context.
    ///
    /// Never fails: a missing shader is logged once and replaced by a
    /// fallback, and a material the context refuses to create leaves an
    /// empty entry.
    pub fn build(ctx: &mut dyn RenderContext) -> Self {
        let mut materials = [None; PipelineKey::COUNT];

        for shading in [Shading::Colored, Shading::Shaded] {
            let Some(shader) = resolve_shader(ctx, shading.shader_name()) else {
                continue;
            };

            for key in PipelineKey::all().filter(|key| key.shading == shading) {
                let descriptor = MaterialDescriptor::new(shader)
                    .with_cull_mode(key.cull_mode)
                    .with_depth_test(key.depth_test)
                    .with_label(format!(
                        "dbgdraw_{:?}_{:?}_{:?}",
                        key.shading, key.depth_test, key.cull_mode
                    ));
                match ctx.create_material(&descriptor) {
                    Ok(material) => {
                        ctx.set_material_color(material, WHITE);
                        materials[key.index()] = Some(material);
                    }
                    Err(err) => log::error!("DebugDraw: {err} ({:?})", key),
                }
            }
        }

        let built = materials.iter().flatten().count();
        log::debug!(
            "DebugDraw: pipeline state cache built ({}/{} materials)",
            built,
            PipelineKey::COUNT
        );

        Self { materials }
    }

    /// Material for a key, if one could be created.
    #[inline]
    pub fn material(&self, key: PipelineKey) -> Option<MaterialId> {
        self.materials[key.index()]
    }

    /// Whether every key has a material.
    pub fn is_complete(&self) -> bool {
        self.materials.iter().all(Option::is_some)
    }

    /// Reset the tint of every material to white.
    pub fn reset_tints(&self, ctx: &mut dyn RenderContext) {
        for material in self.materials.iter().flatten() {
            ctx.set_material_color(*material, WHITE);
        }
    }

    /// Hand every material back to the context.
    ///
    /// Materials shared by several keys (through a fallback shader) are
    /// still distinct objects and released individually.
    pub fn release(&mut self, ctx: &mut dyn RenderContext) {
        for slot in &mut self.materials {
            if let Some(material) = slot.take() {
                ctx.release_material(material);
            }
        }
    }
}

/// Find a shader by name, falling back to the generic colored shaders.
fn resolve_shader(ctx: &mut dyn RenderContext, name: &str) -> Option<ShaderId> {
    if let Some(shader) = ctx.find_shader(name) {
        return Some(shader);
    }

    log::error!("DebugDraw: cannot find shader '{name}'. Debug drawing will not work correctly.");
    for fallback in [COLORED_SHADER, FALLBACK_SHADER] {
        if fallback == name {
            continue;
        }
        if let Some(shader) = ctx.find_shader(fallback) {
            log::warn!("DebugDraw: using '{fallback}' in place of '{name}'");
            return Some(shader);
        }
    }

    log::error!("DebugDraw: no fallback shader available for '{name}'");
    None
}
