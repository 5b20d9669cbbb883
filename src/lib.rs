pub mod shared {
    pub mod core {
        pub mod aggregate;
        pub mod aggregate_factory;
        pub mod domain_error;
        pub mod event;
        pub mod identity;
    }
    pub mod application {
        pub mod application_service;
        pub mod command;
        pub mod command_queue;
        pub mod domain_error_router;
        pub mod service_host;
    }
    pub mod infrastructure {
        pub mod conflict_detector;
        pub mod event_persistence;
        pub mod event_publisher;
        pub mod event_serializer;
        pub mod event_store;
        pub mod repository;
        pub mod stream_locks;
    }
}

pub mod modules {
    pub mod examples {
        pub mod application_service;
        pub mod commands;
        pub mod core {
            pub mod conflict_rules;
            pub mod events;
            pub mod identity;
            pub mod state;
        }
        pub mod use_cases {
            pub mod open_example {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod increment_counter {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod get_example {
                pub mod inbound {
                    pub mod http;
                }
            }
        }
    }
}

pub mod shell;
