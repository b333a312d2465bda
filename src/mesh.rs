//! Triangle mesh accumulator.
//!
//! Tracks an opacity per unordered triple of mutually-adjacent particles.
//! Present triangles are smoothed toward a closeness-derived target with an
//! EMA; absent ones decay geometrically and are evicted once negligible.
//! Smoothing instead of instant on/off is what keeps the mesh from
//! flickering as connectivity changes frame to frame.

use std::collections::{HashMap, HashSet};

/// Opacity at or below which a cache entry is dropped.
pub const MIN_TRI_ALPHA: f32 = 0.003;

/// Canonical triangle key, always `i < j < k`.
pub type TriKey = (u32, u32, u32);

pub struct TriangleMesh {
    alpha: HashMap<TriKey, f32>,
    strength: f32,
    smoothing: f32,
    fade_out: f32,
    // per-frame scratch, kept to avoid reallocation
    mark: Vec<bool>,
    present: HashSet<TriKey>,
}

impl TriangleMesh {
    pub fn new(strength: f32, smoothing: f32, fade_out: f32) -> Self {
        Self {
            alpha: HashMap::new(),
            strength,
            smoothing,
            fade_out,
            mark: Vec::new(),
            present: HashSet::new(),
        }
    }

    pub fn reconfigure(&mut self, strength: f32, smoothing: f32, fade_out: f32) {
        self.strength = strength;
        self.smoothing = smoothing;
        self.fade_out = fade_out;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    #[inline]
    pub fn alpha_of(&self, key: TriKey) -> Option<f32> {
        self.alpha.get(&key).copied()
    }

    /// Find all triangles of mutually-adjacent particles and smooth their
    /// opacities; decay and evict everything else.
    ///
    /// `neighbors[i]` must be sorted ascending (the spatial grid guarantees
    /// this) so enumerating `i < j < k` visits each triangle exactly once.
    /// `closeness(i, j)` is the pairwise score in `[0, 1]`.
    pub fn update<F>(&mut self, neighbors: &[Vec<u32>], closeness: F)
    where
        F: Fn(u32, u32) -> f32,
    {
        let n = neighbors.len();
        self.mark.clear();
        self.mark.resize(n, false);
        self.present.clear();

        for i in 0..n {
            // mark i's forward neighbors for O(1) adjacency tests
            for &j in &neighbors[i] {
                if j as usize > i {
                    self.mark[j as usize] = true;
                }
            }

            for &j in &neighbors[i] {
                if j as usize <= i {
                    continue;
                }
                for &k in &neighbors[j as usize] {
                    if k <= j || !self.mark[k as usize] {
                        continue;
                    }
                    let i = i as u32;
                    let t = (closeness(i, j) + closeness(j, k) + closeness(k, i)) / 3.0;
                    let target = (0.05 + 0.22 * t) * self.strength;
                    let key = (i, j, k);
                    self.present.insert(key);

                    let entry = self.alpha.entry(key).or_insert(0.0);
                    *entry += (target - *entry) * self.smoothing;
                }
            }

            for &j in &neighbors[i] {
                if j as usize > i {
                    self.mark[j as usize] = false;
                }
            }
        }

        let fade = 1.0 - self.fade_out;
        let present = &self.present;
        self.alpha.retain(|key, a| {
            if present.contains(key) {
                true
            } else {
                *a *= fade;
                *a > MIN_TRI_ALPHA
            }
        });
    }

    /// Decay every cached triangle one step, as if none were present.
    /// Used while triangle shading is disabled so stale entries do not
    /// reappear at full opacity when shading resumes.
    pub fn decay_all(&mut self) {
        let fade = 1.0 - self.fade_out;
        self.alpha.retain(|_, a| {
            *a *= fade;
            *a > MIN_TRI_ALPHA
        });
    }

    /// Cache contents sorted ascending by opacity (faintest first), ties
    /// broken by key so the draw order is deterministic.
    pub fn sorted_entries(&self) -> Vec<(TriKey, f32)> {
        let mut entries: Vec<(TriKey, f32)> = self.alpha.iter().map(|(k, a)| (*k, *a)).collect();
        entries.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        entries
    }

    pub fn clear(&mut self) {
        self.alpha.clear();
    }
}
