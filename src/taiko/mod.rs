pub use self::reconstructor::TaikoReconstructor;

mod reconstructor;
