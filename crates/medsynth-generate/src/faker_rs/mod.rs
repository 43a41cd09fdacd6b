mod adapter;

pub use adapter::FakeRsAdapter;
