mod session_store_tests;
