/*!
   Framework code for making it easier to write test cases.

   A test case implements [`IcqTest`](base::IcqTest) and is run with
   [`run_icq_test`](base::run_icq_test), which sets up the local network
   and hands the connected [`TestChains`](chains::TestChains) to the test.
*/

pub mod base;
pub mod chains;
