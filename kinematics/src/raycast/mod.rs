/*!
Ray probing root module.

Box-shaped actors and platforms detect their surroundings by casting fans of short parallel
rays from just inside their own hull. The code is split for clarity:

- probe:      corner origins of a box shrunk by the skin width
- spacing:    even spacing between parallel rays for clamped ray counts
- controller: per-instance owner of skin, counts, spacing and origins; builds ray fans
- query:      the ray-query seam implemented by collision backends
*/

pub mod controller;
pub mod probe;
pub mod query;
pub mod spacing;

pub use controller::RaycastController;
pub use probe::RaycastOrigins;
pub use query::{RayHit, RayQuery};
pub use spacing::RaySpacing;
