//! Session-based FFI for beadtrack.
//!
//! Functions:
//! - `bead_session_create` / `bead_session_free` - build a track, own a ride
//! - `bead_session_tick` - advance one frame, write the cart pose
//! - `bead_session_set_follow` - switch the camera mode
//! - `bead_session_curve_len` / `bead_session_copy_curve` - centreline samples
//! - `bead_session_copy_rails` - offset rail samples
//!
//! # Error Codes
//! - `0`: Success
//! - `-1`: Null pointer
//! - `-2`: Invalid input (track could not be built, bad `dt`)
//! - `-3`: Buffer too small (resize and retry)

use tracing::warn;

use crate::ride::{tick, CameraMode, SimulationState};
use crate::sim::{Float3, Matrix4, Phase, SimulationParams};
use crate::track::{Track, DEMO_LOOP};

pub const BEAD_OK: i32 = 0;
pub const BEAD_NULL_POINTER: i32 = -1;
pub const BEAD_INVALID_INPUT: i32 = -2;
pub const BEAD_BUFFER_TOO_SMALL: i32 = -3;

/// Opaque handle to a ride session.
pub type BeadSessionHandle = *mut std::ffi::c_void;

struct Session {
    track: Track,
    state: SimulationState,
}

/// Per-tick output for the host.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct BeadPose {
    /// Column-major cart model matrix.
    pub pose: Matrix4,
    pub bead: Float3,
    pub phase: Phase,
    pub velocity: f32,
    /// Non-zero when the camera should follow the bead.
    pub follow: i32,
}

/// Build a track from control points and start a ride on its crest.
///
/// A null `points` with `count == 0` builds the demo loop.
///
/// # Safety
/// - `points` must be valid for `count` reads, or null with `count == 0`
/// - `out_handle` must be a valid pointer; on success it receives a handle
///   that must be released with `bead_session_free`
#[no_mangle]
pub unsafe extern "C" fn bead_session_create(
    points: *const Float3,
    count: usize,
    subdivisions: u32,
    out_handle: *mut BeadSessionHandle,
) -> i32 {
    if out_handle.is_null() || (points.is_null() && count > 0) {
        return BEAD_NULL_POINTER;
    }
    *out_handle = std::ptr::null_mut();

    let control_points: &[Float3] = if points.is_null() {
        &DEMO_LOOP
    } else {
        std::slice::from_raw_parts(points, count)
    };
    let params = SimulationParams {
        subdivisions,
        ..SimulationParams::default()
    };

    let track = match Track::build(control_points, params) {
        Ok(track) => track,
        Err(err) => {
            warn!(%err, "bead_session_create failed");
            return BEAD_INVALID_INPUT;
        }
    };
    let state = SimulationState::new(&track);

    *out_handle = Box::into_raw(Box::new(Session { track, state })) as BeadSessionHandle;
    BEAD_OK
}

/// Free a session handle.
///
/// # Safety
/// - `handle` must be a valid handle from `bead_session_create`, or null
#[no_mangle]
pub unsafe extern "C" fn bead_session_free(handle: BeadSessionHandle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle as *mut Session));
    }
}

/// Advance the ride by `dt` seconds and write the resulting pose.
///
/// # Safety
/// - `handle` must be a valid handle from `bead_session_create`
/// - `out` must be a valid pointer to a `BeadPose`
#[no_mangle]
pub unsafe extern "C" fn bead_session_tick(
    handle: BeadSessionHandle,
    dt: f32,
    out: *mut BeadPose,
) -> i32 {
    if handle.is_null() || out.is_null() {
        return BEAD_NULL_POINTER;
    }
    if !dt.is_finite() || dt < 0.0 {
        return BEAD_INVALID_INPUT;
    }

    let session = &mut *(handle as *mut Session);
    let request = tick(&mut session.state, dt, &session.track);

    *out = BeadPose {
        pose: request.pose,
        bead: request.bead,
        phase: request.phase,
        velocity: request.velocity,
        follow: i32::from(request.camera.is_some()),
    };
    BEAD_OK
}

/// Set the camera mode: non-zero follows the bead, zero frees the camera.
///
/// # Safety
/// - `handle` must be a valid handle from `bead_session_create`
#[no_mangle]
pub unsafe extern "C" fn bead_session_set_follow(handle: BeadSessionHandle, follow: i32) -> i32 {
    if handle.is_null() {
        return BEAD_NULL_POINTER;
    }
    let session = &mut *(handle as *mut Session);
    session.state.camera_mode = if follow != 0 {
        CameraMode::FollowBead
    } else {
        CameraMode::Free
    };
    BEAD_OK
}

/// Number of centreline samples (also the rail length).
///
/// # Returns
/// - Sample count on success
/// - `-1` if `handle` is null
///
/// # Safety
/// - `handle` must be a valid handle from `bead_session_create`, or null
#[no_mangle]
pub unsafe extern "C" fn bead_session_curve_len(handle: BeadSessionHandle) -> i64 {
    if handle.is_null() {
        return i64::from(BEAD_NULL_POINTER);
    }
    let session = &*(handle as *const Session);
    session.track.curve.len() as i64
}

/// Copy the centreline samples into `out`.
///
/// # Safety
/// - `handle` must be a valid handle from `bead_session_create`
/// - `out` must be valid for `capacity` writes
#[no_mangle]
pub unsafe extern "C" fn bead_session_copy_curve(
    handle: BeadSessionHandle,
    out: *mut Float3,
    capacity: usize,
) -> i32 {
    if handle.is_null() || out.is_null() {
        return BEAD_NULL_POINTER;
    }
    let session = &*(handle as *const Session);
    copy_into(session.track.curve.points(), out, capacity)
}

/// Copy both rails into `left` and `right`.
///
/// # Safety
/// - `handle` must be a valid handle from `bead_session_create`
/// - `left` and `right` must each be valid for `capacity` writes
#[no_mangle]
pub unsafe extern "C" fn bead_session_copy_rails(
    handle: BeadSessionHandle,
    left: *mut Float3,
    right: *mut Float3,
    capacity: usize,
) -> i32 {
    if handle.is_null() || left.is_null() || right.is_null() {
        return BEAD_NULL_POINTER;
    }
    let rails = &(*(handle as *const Session)).track.rails;
    if rails.left.len() > capacity || rails.right.len() > capacity {
        return BEAD_BUFFER_TOO_SMALL;
    }
    copy_into(&rails.left, left, capacity);
    copy_into(&rails.right, right, capacity)
}

// --- Helpers ---

unsafe fn copy_into(src: &[Float3], dst: *mut Float3, capacity: usize) -> i32 {
    if src.len() > capacity {
        return BEAD_BUFFER_TOO_SMALL;
    }
    std::ptr::copy_nonoverlapping(src.as_ptr(), dst, src.len());
    BEAD_OK
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn demo_session() -> BeadSessionHandle {
        let mut handle: BeadSessionHandle = std::ptr::null_mut();
        let code = bead_session_create(DEMO_LOOP.as_ptr(), DEMO_LOOP.len(), 4, &mut handle);
        assert_eq!(code, BEAD_OK);
        assert!(!handle.is_null());
        handle
    }

    #[test]
    fn create_tick_and_free() {
        unsafe {
            let handle = demo_session();
            assert_eq!(bead_session_curve_len(handle), 113);

            let mut pose = std::mem::MaybeUninit::<BeadPose>::uninit();
            assert_eq!(bead_session_tick(handle, 1.0 / 60.0, pose.as_mut_ptr()), BEAD_OK);
            let pose = pose.assume_init();
            assert_eq!(pose.phase, Phase::FreeFall);
            assert_eq!(pose.pose.translation(), pose.bead);
            assert_eq!(pose.follow, 0);

            bead_session_free(handle);
        }
    }

    #[test]
    fn null_points_build_demo_loop() {
        unsafe {
            let mut handle: BeadSessionHandle = std::ptr::null_mut();
            assert_eq!(
                bead_session_create(std::ptr::null(), 0, 4, &mut handle),
                BEAD_OK
            );
            assert_eq!(bead_session_curve_len(handle), 113);
            bead_session_free(handle);
        }
    }

    #[test]
    fn invalid_track_reports_invalid_input() {
        unsafe {
            let single = [Float3::ZERO];
            let mut handle: BeadSessionHandle = std::ptr::null_mut();
            let code = bead_session_create(single.as_ptr(), single.len(), 4, &mut handle);
            assert_eq!(code, BEAD_INVALID_INPUT);
            assert!(handle.is_null());
        }
    }

    #[test]
    fn oversized_subdivision_count_is_invalid_input() {
        unsafe {
            let mut handle: BeadSessionHandle = std::ptr::null_mut();
            let code = bead_session_create(DEMO_LOOP.as_ptr(), DEMO_LOOP.len(), 64, &mut handle);
            assert_eq!(code, BEAD_INVALID_INPUT);
            assert!(handle.is_null());
        }
    }

    #[test]
    fn huge_dt_keeps_the_bead_on_the_track() {
        unsafe {
            let handle = demo_session();
            let mut pose = std::mem::MaybeUninit::<BeadPose>::uninit();
            assert_eq!(bead_session_tick(handle, 1.0e9, pose.as_mut_ptr()), BEAD_OK);
            let pose = pose.assume_init();
            assert!(pose.bead.is_finite());
            assert!(pose.velocity.is_finite());
            bead_session_free(handle);
        }
    }

    #[test]
    fn null_pointers_are_rejected() {
        unsafe {
            let mut handle: BeadSessionHandle = std::ptr::null_mut();
            assert_eq!(
                bead_session_create(std::ptr::null(), 3, 4, &mut handle),
                BEAD_NULL_POINTER
            );
            assert_eq!(
                bead_session_tick(std::ptr::null_mut(), 0.1, std::ptr::null_mut()),
                BEAD_NULL_POINTER
            );
            assert_eq!(bead_session_curve_len(std::ptr::null_mut()), -1);
            bead_session_free(std::ptr::null_mut());
        }
    }

    #[test]
    fn copy_curve_checks_capacity() {
        unsafe {
            let handle = demo_session();
            let len = bead_session_curve_len(handle) as usize;

            let mut small = vec![Float3::ZERO; len - 1];
            assert_eq!(
                bead_session_copy_curve(handle, small.as_mut_ptr(), small.len()),
                BEAD_BUFFER_TOO_SMALL
            );

            let mut curve = vec![Float3::ZERO; len];
            assert_eq!(bead_session_copy_curve(handle, curve.as_mut_ptr(), len), BEAD_OK);
            assert_eq!(curve[0], curve[len - 1]);

            let mut left = vec![Float3::ZERO; len];
            let mut right = vec![Float3::ZERO; len];
            assert_eq!(
                bead_session_copy_rails(handle, left.as_mut_ptr(), right.as_mut_ptr(), len),
                BEAD_OK
            );
            assert!((left[5].distance(right[5]) - 0.6).abs() < 1e-4);
            assert!(left[5].midpoint(right[5]).distance(curve[5]) < 1e-4);

            bead_session_free(handle);
        }
    }

    #[test]
    fn follow_mode_round_trips_through_tick() {
        unsafe {
            let handle = demo_session();
            assert_eq!(bead_session_set_follow(handle, 1), BEAD_OK);

            let mut pose = std::mem::MaybeUninit::<BeadPose>::uninit();
            assert_eq!(bead_session_tick(handle, 1.0 / 60.0, pose.as_mut_ptr()), BEAD_OK);
            assert_eq!(pose.assume_init().follow, 1);

            assert_eq!(
                bead_session_tick(handle, f32::NAN, pose.as_mut_ptr()),
                BEAD_INVALID_INPUT
            );
            bead_session_free(handle);
        }
    }
}
