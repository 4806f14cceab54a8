/*!
   Utilities for suspending the test.
*/

use core::time::Duration;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::thread::sleep;
use tracing::{error, warn};

use crate::error::Error;

/**
   Call this function in the middle of a test code of interest,
   so that we can suspend the test and still interact with the
   local network and the relayers.
*/
pub fn suspend<R>() -> R {
    warn!("suspending the test indefinitely. you can still interact with the running network and relayers");

    loop {
        sleep(Duration::from_secs(999_999_999))
    }
}

/**
   Runs `cont`, suspending the test when it fails or panics and
   `hang_on_fail` is set, so that the network can be inspected before
   it is torn down.
*/
pub fn hang_on_error<R>(
    hang_on_fail: bool,
    cont: impl FnOnce() -> Result<R, Error>,
) -> Result<R, Error> {
    let result = catch_unwind(AssertUnwindSafe(cont));

    match result {
        Err(e) => {
            if hang_on_fail {
                error!("test panicked with HANG_ON_FAIL=1, suspending the test to allow debugging");
                suspend()
            } else {
                error!("test panicked. set HANG_ON_FAIL=1 to suspend the test on failure for debugging");
                resume_unwind(e)
            }
        }
        Ok(Err(e)) => {
            if hang_on_fail {
                error!(
                    "test failed with HANG_ON_FAIL=1, suspending the test to allow debugging: {:?}",
                    e
                );
                suspend()
            } else {
                error!(
                    "test failure occured. set HANG_ON_FAIL=1 to suspend the test on failure for debugging: {:?}",
                    e
                );
                Err(e)
            }
        }
        Ok(Ok(res)) => Ok(res),
    }
}
