//! Utilities.
use anyhow::{anyhow, Result};
use candle_core::{Device, Tensor};
use candle_nn::VarMap;
use std::collections::HashMap;

/// Detached copies of a [`VarMap`]'s parameters, keyed by variable name.
///
/// This is the opaque snapshot behind target-network synchronization: copying
/// a snapshot into another [`VarMap`] is a full parameter copy, never an
/// alias, so later updates of the source leave the destination untouched.
pub struct NamedTensors {
    named: HashMap<String, Tensor>,
}

impl NamedTensors {
    /// Snapshots the parameters of `vs` onto the CPU.
    pub fn copy_from(vs: &VarMap) -> Result<Self> {
        let data = vs.data().lock().unwrap();
        let mut named = HashMap::new();
        for (k, v) in data.iter() {
            named.insert(k.clone(), v.as_tensor().detach().to_device(&Device::Cpu)?);
        }
        Ok(Self { named })
    }

    /// Overwrites the parameters of `vs` with this snapshot.
    ///
    /// Variables are matched by name; both var maps must come from the same
    /// architecture.
    pub fn copy_to(&self, vs: &VarMap) -> Result<()> {
        let data = vs.data().lock().unwrap();
        for (k, v) in data.iter() {
            let src = self
                .named
                .get(k)
                .ok_or_else(|| anyhow!("parameter {} missing in snapshot", k))?;
            v.set(&src.to_device(v.as_tensor().device())?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::DType;
    use candle_nn::Init;

    fn varmap_with(name: &str, values: &[f32]) -> Result<VarMap> {
        let vm = VarMap::new();
        vm.get(
            (values.len(),),
            name,
            Init::Const(0.0),
            DType::F32,
            &Device::Cpu,
        )?;
        let t = Tensor::from_slice(values, &[values.len()], &Device::Cpu)?;
        vm.data().lock().unwrap().get(name).unwrap().set(&t)?;
        Ok(vm)
    }

    #[test]
    fn snapshot_copies_values_by_name() -> Result<()> {
        let src = varmap_with("var1", &[1.0, 2.0, 3.0])?;
        let dest = varmap_with("var1", &[7.0, 7.0, 7.0])?;

        NamedTensors::copy_from(&src)?.copy_to(&dest)?;

        let copied = dest
            .data()
            .lock()
            .unwrap()
            .get("var1")
            .unwrap()
            .as_tensor()
            .to_vec1::<f32>()?;
        assert_eq!(copied, vec![1.0, 2.0, 3.0]);
        Ok(())
    }

    #[test]
    fn snapshot_is_not_an_alias() -> Result<()> {
        let src = varmap_with("var1", &[1.0, 1.0])?;
        let dest = varmap_with("var1", &[0.0, 0.0])?;
        let snapshot = NamedTensors::copy_from(&src)?;
        snapshot.copy_to(&dest)?;

        // Mutating the source afterwards must not leak into the destination.
        let t = Tensor::from_slice(&[9.0f32, 9.0], &[2], &Device::Cpu)?;
        src.data().lock().unwrap().get("var1").unwrap().set(&t)?;

        let copied = dest
            .data()
            .lock()
            .unwrap()
            .get("var1")
            .unwrap()
            .as_tensor()
            .to_vec1::<f32>()?;
        assert_eq!(copied, vec![1.0, 1.0]);
        Ok(())
    }

    #[test]
    fn missing_parameter_is_an_error() -> Result<()> {
        let src = varmap_with("var1", &[1.0])?;
        let dest = varmap_with("other", &[1.0])?;
        assert!(NamedTensors::copy_from(&src)?.copy_to(&dest).is_err());
        Ok(())
    }
}
