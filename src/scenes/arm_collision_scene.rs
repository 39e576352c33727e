use itertools::Itertools;
use nalgebra::Vector3;
use serde::{Serialize, Deserialize};
use crate::arm_modules::arm_chain_module::{ArmChain, ArmFKResult};
use crate::utils::utils_console::{arm_print, PrintColor, PrintMode};
use crate::utils::utils_errors::ArmIKError;
use crate::utils::utils_robot::link::Link;
use crate::utils::utils_se3::homogeneous_matrix::HomogeneousMatrix;
use crate::utils::utils_shape_geometry::bounding_proxy::{BoundingProxy, ProxySignature};

/// Scale on the summed max extents that the L1 centroid distance is compared against.
///
/// Two boxes can only overlap when their centers are within the sum of their half diagonals
/// (at most `sqrt(3)/2` of the max extent each), and the L1 distance is at most `sqrt(3)` times the
/// Euclidean one, so `1.5 * (max_a + max_b)` never prunes an overlapping pair.
pub const BROAD_PHASE_L1_SCALE: f64 = 1.5;

/// The collision engine.  Holds one [`BoundingProxy`] per arm link plus the static obstacle
/// proxies, and answers self- and obstacle-intersection queries for a given set of link transforms.
///
/// Every query runs a broad phase (L1 centroid distance against the scaled sum of max extents) and
/// only then the exact box-box test.  Links whose indices differ by one are structurally connected
/// and are never tested against each other.
///
/// The scene keeps no per-query state; pass fresh link transforms (one per arm link, link `i` posed
/// by `forward[i]`) on every call.
#[derive(Clone, Debug)]
pub struct ArmCollisionScene {
    arm_proxies: Vec<BoundingProxy>,
    world_proxies: Vec<BoundingProxy>
}
impl ArmCollisionScene {
    pub fn new(chain: &ArmChain) -> Result<Self, ArmIKError> {
        return Self::new_from_links(chain.links());
    }
    pub fn new_from_links(links: &[Link]) -> Result<Self, ArmIKError> {
        let mut arm_proxies = vec![];
        for (i, link) in links.iter().enumerate() {
            arm_proxies.push(BoundingProxy::new_arm_link(i, link)?);
        }

        Ok(Self {
            arm_proxies,
            world_proxies: vec![]
        })
    }
    /// Builds a scene directly from proxies.  Arm proxies must be given in link order.
    pub fn new_from_proxies(arm_proxies: Vec<BoundingProxy>, world_proxies: Vec<BoundingProxy>) -> Self {
        Self {
            arm_proxies,
            world_proxies
        }
    }
    pub fn add_obstacle_from_aabb(&mut self, min: &Vector3<f64>, max: &Vector3<f64>) -> Result<(), ArmIKError> {
        let p = BoundingProxy::new_obstacle_from_aabb(self.world_proxies.len(), min, max)?;
        self.world_proxies.push(p);
        Ok(())
    }
    pub fn add_obstacle(&mut self, center: &Vector3<f64>, length: f64, width: f64, height: f64) -> Result<(), ArmIKError> {
        let p = BoundingProxy::new_obstacle(self.world_proxies.len(), center, length, width, height)?;
        self.world_proxies.push(p);
        Ok(())
    }
    pub fn arm_proxies(&self) -> &Vec<BoundingProxy> {
        &self.arm_proxies
    }
    pub fn world_proxies(&self) -> &Vec<BoundingProxy> {
        &self.world_proxies
    }
    pub fn num_links(&self) -> usize {
        self.arm_proxies.len()
    }
    /// Returns true if the pair may overlap and must go to the narrow phase.
    pub fn broad_phase_check(a: &BoundingProxy, a_transform: &HomogeneousMatrix, b: &BoundingProxy, b_transform: &HomogeneousMatrix) -> bool {
        let ca = a.transformed_centroid(a_transform);
        let cb = b.transformed_centroid(b_transform);
        return ca.l1_translation_distance(&cb) <= BROAD_PHASE_L1_SCALE * (a.max_extent() + b.max_extent());
    }
    pub fn narrow_phase_check(a: &BoundingProxy, a_transform: &HomogeneousMatrix, b: &BoundingProxy, b_transform: &HomogeneousMatrix) -> Result<bool, ArmIKError> {
        return a.intersection_test(a_transform, b, b_transform);
    }
    fn pair_collides(a: &BoundingProxy, a_transform: &HomogeneousMatrix, b: &BoundingProxy, b_transform: &HomogeneousMatrix) -> Result<bool, ArmIKError> {
        if !Self::broad_phase_check(a, a_transform, b, b_transform) { return Ok(false); }
        return Self::narrow_phase_check(a, a_transform, b, b_transform);
    }
    fn check_transforms_size(&self, link_transforms: &[HomogeneousMatrix]) -> Result<(), ArmIKError> {
        if link_transforms.len() != self.arm_proxies.len() {
            return Err(ArmIKError::new_wrong_size_error("ArmCollisionScene link transforms", link_transforms.len(), self.arm_proxies.len(), file!(), line!()));
        }
        Ok(())
    }
    /// All link index pairs `(i, j)` with `j - i >= 2`.
    fn non_adjacent_pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.arm_proxies.len()).tuple_combinations().filter(|(i, j)| j - i > 1)
    }
    pub fn find_self_intersections(&self, link_transforms: &[HomogeneousMatrix]) -> Result<Vec<bool>, ArmIKError> {
        self.check_transforms_size(link_transforms)?;

        let mut is_colliding = vec![false; self.arm_proxies.len()];
        for (i, j) in self.non_adjacent_pairs() {
            if Self::pair_collides(&self.arm_proxies[i], &link_transforms[i], &self.arm_proxies[j], &link_transforms[j])? {
                is_colliding[i] = true;
                is_colliding[j] = true;
            }
        }

        Ok(is_colliding)
    }
    /// Stops at the first colliding pair.
    pub fn is_self_intersecting(&self, link_transforms: &[HomogeneousMatrix]) -> Result<bool, ArmIKError> {
        self.check_transforms_size(link_transforms)?;

        for (i, j) in self.non_adjacent_pairs() {
            if Self::pair_collides(&self.arm_proxies[i], &link_transforms[i], &self.arm_proxies[j], &link_transforms[j])? {
                return Ok(true);
            }
        }

        Ok(false)
    }
    pub fn find_obstacle_intersections(&self, link_transforms: &[HomogeneousMatrix]) -> Result<Vec<bool>, ArmIKError> {
        self.check_transforms_size(link_transforms)?;

        let identity = HomogeneousMatrix::new_identity();
        let mut is_colliding = vec![false; self.arm_proxies.len()];
        for (i, arm_proxy) in self.arm_proxies.iter().enumerate() {
            for world_proxy in &self.world_proxies {
                if Self::pair_collides(arm_proxy, &link_transforms[i], world_proxy, &identity)? {
                    is_colliding[i] = true;
                    break;
                }
            }
        }

        Ok(is_colliding)
    }
    /// Stops at the first link found touching an obstacle.
    pub fn is_intersecting_obstacles(&self, link_transforms: &[HomogeneousMatrix]) -> Result<bool, ArmIKError> {
        self.check_transforms_size(link_transforms)?;

        let identity = HomogeneousMatrix::new_identity();
        for (i, arm_proxy) in self.arm_proxies.iter().enumerate() {
            for world_proxy in &self.world_proxies {
                if Self::pair_collides(arm_proxy, &link_transforms[i], world_proxy, &identity)? {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
    /// L1 distance between the current centroids of arm links `i` and `j`.
    pub fn distance(&self, i: usize, j: usize, link_transforms: &[HomogeneousMatrix]) -> Result<f64, ArmIKError> {
        self.check_transforms_size(link_transforms)?;
        ArmIKError::new_check_for_idx_out_of_bound_error(i, self.arm_proxies.len(), file!(), line!())?;
        ArmIKError::new_check_for_idx_out_of_bound_error(j, self.arm_proxies.len(), file!(), line!())?;

        let c1 = self.arm_proxies[i].transformed_centroid(&link_transforms[i]);
        let c2 = self.arm_proxies[j].transformed_centroid(&link_transforms[j]);
        return Ok(c1.l1_translation_distance(&c2));
    }
    /// The non-adjacent link pair with the smallest centroid distance, or None when the arm has
    /// fewer than three links.
    pub fn find_closest_sections(&self, link_transforms: &[HomogeneousMatrix]) -> Result<Option<ClosestPair>, ArmIKError> {
        self.check_transforms_size(link_transforms)?;

        let centroids: Vec<HomogeneousMatrix> = self.arm_proxies.iter()
            .zip(link_transforms.iter())
            .map(|(p, t)| p.transformed_centroid(t))
            .collect();

        let mut closest: Option<ClosestPair> = None;
        for (i, j) in self.non_adjacent_pairs() {
            let distance = centroids[i].l1_translation_distance(&centroids[j]);
            let is_closer = match &closest {
                None => { true }
                Some(c) => { distance < c.distance }
            };
            if is_closer { closest = Some(ClosestPair { i, j, distance }); }
        }

        Ok(closest)
    }
    /// Per-link OR of self-intersection and obstacle-intersection, plus the closest section pair.
    pub fn collision_status(&self, link_transforms: &[HomogeneousMatrix]) -> Result<CollisionStatus, ArmIKError> {
        let self_intersections = self.find_self_intersections(link_transforms)?;
        let obstacle_intersections = self.find_obstacle_intersections(link_transforms)?;
        let is_colliding = self_intersections.iter().zip(obstacle_intersections.iter()).map(|(a, b)| *a || *b).collect();
        let closest = self.find_closest_sections(link_transforms)?;

        Ok(CollisionStatus {
            is_colliding,
            self_intersections,
            obstacle_intersections,
            closest
        })
    }
    pub fn collision_status_from_fk(&self, fk_res: &ArmFKResult) -> Result<CollisionStatus, ArmIKError> {
        return self.collision_status(fk_res.link_transforms());
    }
    /// Proxy centroid offsets and half extents, enough to rebuild the scene elsewhere.
    pub fn dump(&self) -> CollisionDump {
        let offsets = |proxies: &Vec<BoundingProxy>| -> Vec<[f64; 3]> {
            proxies.iter().map(|p| { let t = p.centroid_offset().translation(); [t[0], t[1], t[2]] }).collect()
        };
        let half_extents = |proxies: &Vec<BoundingProxy>| -> Vec<[f64; 3]> {
            proxies.iter().map(|p| { let h = p.half_extents(); [h[0], h[1], h[2]] }).collect()
        };

        CollisionDump {
            arm_offsets: offsets(&self.arm_proxies),
            arm_half_extents: half_extents(&self.arm_proxies),
            world_offsets: offsets(&self.world_proxies),
            world_half_extents: half_extents(&self.world_proxies)
        }
    }
    /// Rebuilds a scene from a [`CollisionDump`].
    pub fn new_from_dump(dump: &CollisionDump) -> Result<Self, ArmIKError> {
        if dump.arm_offsets.len() != dump.arm_half_extents.len() {
            return Err(ArmIKError::new_wrong_size_error("new_from_dump arm_half_extents", dump.arm_half_extents.len(), dump.arm_offsets.len(), file!(), line!()));
        }
        if dump.world_offsets.len() != dump.world_half_extents.len() {
            return Err(ArmIKError::new_wrong_size_error("new_from_dump world_half_extents", dump.world_half_extents.len(), dump.world_offsets.len(), file!(), line!()));
        }

        let mut arm_proxies = vec![];
        for (link_idx, (o, h)) in dump.arm_offsets.iter().zip(dump.arm_half_extents.iter()).enumerate() {
            arm_proxies.push(BoundingProxy::new(ProxySignature::ArmLink { link_idx }, HomogeneousMatrix::new_translation(o[0], o[1], o[2]), Vector3::new(h[0], h[1], h[2]))?);
        }
        let mut world_proxies = vec![];
        for (obstacle_idx, (o, h)) in dump.world_offsets.iter().zip(dump.world_half_extents.iter()).enumerate() {
            world_proxies.push(BoundingProxy::new(ProxySignature::Obstacle { obstacle_idx }, HomogeneousMatrix::new_translation(o[0], o[1], o[2]), Vector3::new(h[0], h[1], h[2]))?);
        }

        return Ok(Self::new_from_proxies(arm_proxies, world_proxies));
    }
}

/// Closest non-adjacent link pair by L1 centroid distance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClosestPair {
    pub i: usize,
    pub j: usize,
    pub distance: f64
}

/// Per-link collision flags.  `is_colliding[i]` is true when link `i` touches a non-adjacent arm
/// link or any obstacle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionStatus {
    is_colliding: Vec<bool>,
    self_intersections: Vec<bool>,
    obstacle_intersections: Vec<bool>,
    closest: Option<ClosestPair>
}
impl CollisionStatus {
    pub fn is_colliding(&self) -> &Vec<bool> {
        &self.is_colliding
    }
    pub fn self_intersections(&self) -> &Vec<bool> {
        &self.self_intersections
    }
    pub fn obstacle_intersections(&self) -> &Vec<bool> {
        &self.obstacle_intersections
    }
    pub fn closest(&self) -> Option<&ClosestPair> {
        self.closest.as_ref()
    }
    pub fn any_collision(&self) -> bool {
        self.is_colliding.iter().any(|c| *c)
    }
    pub fn print_summary(&self) {
        for (i, c) in self.is_colliding.iter().enumerate() {
            arm_print(&format!("Link {} ---> ", i), PrintMode::Print, PrintColor::Blue, true);
            let color = if *c { PrintColor::Red } else { PrintColor::Green };
            arm_print(&format!("{} (self: {}, obstacle: {})", if *c { "colliding" } else { "clear" }, self.self_intersections[i], self.obstacle_intersections[i]), PrintMode::Println, color, false);
        }
        if let Some(c) = &self.closest {
            arm_print(&format!("Closest sections: {} and {} at distance {:.4}", c.i, c.j, c.distance), PrintMode::Println, PrintColor::Cyan, false);
        }
    }
}

/// Serializable view of every proxy's centroid offset and half extents (local x, y, z order).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionDump {
    pub arm_offsets: Vec<[f64; 3]>,
    pub arm_half_extents: Vec<[f64; 3]>,
    pub world_offsets: Vec<[f64; 3]>,
    pub world_half_extents: Vec<[f64; 3]>
}
