mod app_router_tests;
