pub use self::reconstructor::OsuReconstructor;

mod reconstructor;
