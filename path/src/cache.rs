use crate::hash::*;
use crate::path::*;
use crate::style::*;
use crate::stroke::*;
use crate::refine::*;

use log::*;

use std::sync::*;
use std::hash::{Hash, Hasher};
use std::collections::{HashMap};
use std::collections::hash_map::{DefaultHasher};

///
/// Options that control how meshes are generated by the path cache
///
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct MeshOptions {
    /// Tolerances used when refining paths before building their stroke outlines
    pub refine: RefineOptions,

    /// Strokes narrower than this are not generated
    pub min_stroke_width: f32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        MeshOptions {
            refine:             RefineOptions::coarse(),
            min_stroke_width:   1e-6,
        }
    }
}

impl MeshOptions {
    pub fn with_refine_options(mut self, refine: RefineOptions) -> MeshOptions {
        self.refine = refine;
        self
    }

    pub fn with_min_stroke_width(mut self, min_stroke_width: f32) -> MeshOptions {
        self.min_stroke_width = min_stroke_width;
        self
    }
}

///
/// The geometry generated for a path drawn with a particular style
///
#[derive(Debug)]
pub struct MeshEntry {
    /// The canonical copy of the path this mesh was generated from
    source_path: Arc<Path>,

    /// The style used to generate the mesh
    style: StrokeStyle,

    /// The outline of the stroke, if the style has a visible stroke
    stroke_path: Option<Path>,

    /// The key this entry is stored under
    hash: u64,
}

impl MeshEntry {
    ///
    /// The path to fill for this mesh (the canonical copy of the source path)
    ///
    #[inline]
    pub fn source_path(&self) -> &Arc<Path> {
        &self.source_path
    }

    #[inline]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    ///
    /// The outline of the stroke: fill this with the nonzero rule to draw the stroke
    ///
    #[inline]
    pub fn stroke_path(&self) -> Option<&Path> {
        self.stroke_path.as_ref()
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

///
/// Content-addressed cache of paths and of the meshes generated from them
///
/// Paths are looked up by their quantized contents rather than by identity, so two paths with the same geometry
/// (to within 1/1024 of a unit) share the same canonical copy and the same meshes. The cache does no locking of
/// its own: wrap it in a `Mutex` to share it between threads.
///
pub struct PathCache {
    /// Canonical paths, indexed by content hash
    paths: HashMap<u64, Vec<Arc<Path>>>,

    /// Generated meshes, indexed by a hash of the path and the style
    meshes: HashMap<u64, Vec<Arc<MeshEntry>>>,

    /// How new meshes are generated
    options: MeshOptions,
}

impl Default for PathCache {
    fn default() -> Self {
        PathCache::new()
    }
}

impl PathCache {
    ///
    /// Creates an empty path cache with the default mesh options
    ///
    pub fn new() -> PathCache {
        PathCache::with_options(MeshOptions::default())
    }

    pub fn with_options(options: MeshOptions) -> PathCache {
        PathCache {
            paths:      HashMap::new(),
            meshes:     HashMap::new(),
            options:    options,
        }
    }

    #[inline]
    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    ///
    /// Returns the canonical copy of a path, adding it to the cache if there isn't one already
    ///
    /// Calling this on a canonical path returns the same `Arc` that it came from.
    ///
    /// Paths are matched after quantizing their coordinates to 1/1024 of a unit. Two paths that differ by less
    /// than that usually share a canonical copy, but a coordinate that sits on either side of a quantization step
    /// (for example 10.00045 and 10.00052, which round to different multiples of 1/1024) hashes differently, so the
    /// second path misses the cache and is stored separately.
    ///
    pub fn find_path(&mut self, path: &Path) -> Arc<Path> {
        let hash    = path.content_hash();
        let bucket  = self.paths.entry(hash).or_insert_with(|| vec![]);

        if let Some(existing) = bucket.iter().find(|existing| paths_match(existing, path)) {
            trace!("Path cache hit ({:x})", hash);
            return Arc::clone(existing);
        }

        debug!("Path cache miss ({:x}, {} segments)", hash, path.segment_count());

        let canonical = Arc::new(path.canonical_copy());
        bucket.push(Arc::clone(&canonical));

        canonical
    }

    ///
    /// Returns the mesh for a path drawn with a particular style, generating it if it's not already cached
    ///
    pub fn find_mesh(&mut self, path: &Path, style: &StrokeStyle) -> Arc<MeshEntry> {
        let source_path = self.find_path(path);
        let hash        = mesh_hash(source_path.content_hash(), style);
        let options     = self.options;
        let bucket      = self.meshes.entry(hash).or_insert_with(|| vec![]);

        if let Some(existing) = bucket.iter().find(|existing| Arc::ptr_eq(&existing.source_path, &source_path) && existing.style.matches(style)) {
            trace!("Mesh cache hit ({:x})", hash);
            return Arc::clone(existing);
        }

        let mesh = Arc::new(build_mesh(source_path, style, hash, &options));
        bucket.push(Arc::clone(&mesh));

        mesh
    }

    ///
    /// The number of canonical paths in this cache
    ///
    pub fn path_count(&self) -> usize {
        self.paths.values().map(|bucket| bucket.len()).sum()
    }

    ///
    /// The number of meshes in this cache
    ///
    pub fn mesh_count(&self) -> usize {
        self.meshes.values().map(|bucket| bucket.len()).sum()
    }

    ///
    /// Removes everything from the cache (any `Arc`s that have been handed out remain valid)
    ///
    pub fn clear(&mut self) {
        self.paths.clear();
        self.meshes.clear();
    }
}

///
/// The key that a mesh is stored under
///
fn mesh_hash(path_hash: u64, style: &StrokeStyle) -> u64 {
    let mut hasher = DefaultHasher::new();
    path_hash.hash(&mut hasher);
    style.content_hash().hash(&mut hasher);

    hasher.finish()
}

///
/// Generates the mesh for a canonical path
///
fn build_mesh(source_path: Arc<Path>, style: &StrokeStyle, hash: u64, options: &MeshOptions) -> MeshEntry {
    let stroke_path = if style.width.abs() > options.min_stroke_width {
        let mut refined = (*source_path).clone();
        let num_split   = presplit_self_intersecting(&mut refined);
        refine_path(&mut refined, &options.refine);

        let stroke = build_stroke(&refined, style);
        debug!("Mesh cache miss ({:x}): built stroke of width {} ({} curves split, {} outline segments)", hash, style.width, num_split, stroke.segment_count());

        Some(stroke)
    } else {
        debug!("Mesh cache miss ({:x}): fill only", hash);
        None
    };

    MeshEntry {
        source_path:    source_path,
        style:          style.clone(),
        stroke_path:    stroke_path,
        hash:           hash,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clear_empties_cache() {
        let mut cache = PathCache::new();
        cache.find_mesh(&Path::rect(0.0, 0.0, 10.0, 10.0), &StrokeStyle::stroke(1.0));

        assert!(cache.path_count() == 1);
        assert!(cache.mesh_count() == 1);

        cache.clear();

        assert!(cache.path_count() == 0);
        assert!(cache.mesh_count() == 0);
    }

    #[test]
    fn thin_strokes_are_not_generated() {
        let mut cache   = PathCache::new();
        let mesh        = cache.find_mesh(&Path::rect(0.0, 0.0, 10.0, 10.0), &StrokeStyle::fill());

        assert!(mesh.stroke_path().is_none());
        assert!(mesh.source_path().is_canonical());
    }
}
